use crate::{
    context::{to_hash, HashChange, NavigationContext, Subscription},
    Callback,
};
use log::trace;
use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::{Rc, Weak},
};

/// The url [`MemoryNavigation::new`] pretends to be at.
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

type ListenerId = u64;

struct Inner {
    base_url: String,
    /// History entries, each one a hash
    entries: Vec<String>,
    cursor: usize,
    pending: VecDeque<HashChange>,
    listeners: Vec<(ListenerId, Callback<HashChange>)>,
    next_listener_id: ListenerId,
}

impl Inner {
    fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn push(&mut self, hash: String) {
        let old_hash = self.current().to_owned();
        if old_hash == hash {
            trace!("hash unchanged at {hash:?}, no history entry");
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(hash.clone());
        self.cursor += 1;
        self.queue(old_hash, hash);
    }

    fn move_to(&mut self, cursor: usize) {
        let old_hash = self.current().to_owned();
        self.cursor = cursor;
        let new_hash = self.current().to_owned();
        if old_hash != new_hash {
            self.queue(old_hash, new_hash);
        }
    }

    fn queue(&mut self, old_hash: String, new_hash: String) {
        trace!("queueing hash change {old_hash:?} -> {new_hash:?}");
        self.pending.push_back(HashChange { old_hash, new_hash });
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener, _)| *listener == id)
    }
}

/// An in-memory [`NavigationContext`] with a browser-like history stack.
///
/// Hash changes are queued and only reach listeners when
/// [`MemoryNavigation::dispatch_pending`] runs, the way a browser delivers
/// `hashchange` from its event loop rather than from inside `location.hash = ..`.
///
/// Clones share the same history.
#[derive(Clone)]
pub struct MemoryNavigation {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryNavigation {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNavigation {
    /// Creates a history with a single entry at [`DEFAULT_BASE_URL`] and no hash.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a history with a single entry at `base_url` and no hash.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                base_url: base_url.into(),
                entries: vec![String::new()],
                cursor: 0,
                pending: VecDeque::new(),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// The full url of the current entry.
    pub fn url(&self) -> String {
        let inner = self.inner.borrow();
        format!("{}{}", inner.base_url, inner.current())
    }

    /// Number of history entries, including entries ahead of the current one.
    pub fn history_len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Number of hash changes waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Goes forward one history entry, if there is one.
    pub fn go_forward(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.cursor + 1 < inner.entries.len() {
            let cursor = inner.cursor + 1;
            inner.move_to(cursor);
        }
    }

    /// Delivers queued hash changes to the listeners registered at delivery
    /// time, returning how many changes were delivered.
    ///
    /// Listeners may navigate while being notified; changes they cause are
    /// delivered by the same call.
    pub fn dispatch_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let (event, listeners) = {
                let mut inner = self.inner.borrow_mut();
                let Some(event) = inner.pending.pop_front() else {
                    break;
                };
                (event, inner.listeners.clone())
            };
            trace!(
                "dispatching hash change {:?} -> {:?} to {} listener(s)",
                event.old_hash,
                event.new_hash,
                listeners.len()
            );
            for (id, listener) in listeners {
                // a previous listener may have unsubscribed this one
                if self.inner.borrow().is_registered(id) {
                    listener.emit(event.clone());
                }
            }
            delivered += 1;
        }
        delivered
    }
}

impl NavigationContext for MemoryNavigation {
    fn hash(&self) -> String {
        self.inner.borrow().current().to_owned()
    }

    fn set_hash(&self, fragment: &str) {
        self.inner.borrow_mut().push(to_hash(fragment));
    }

    fn go_back(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.cursor > 0 {
            let cursor = inner.cursor - 1;
            inner.move_to(cursor);
        } else {
            trace!("already at the first history entry");
        }
    }

    fn subscribe(&self, listener: Callback<HashChange>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        let inner: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().listeners.retain(|(other, _)| *other != id);
            }
        })
    }
}

impl std::fmt::Debug for MemoryNavigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryNavigation")
            .field("url", &format!("{}{}", inner.base_url, inner.current()))
            .field("cursor", &inner.cursor)
            .field("entries", &inner.entries)
            .field("pending", &inner.pending.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
