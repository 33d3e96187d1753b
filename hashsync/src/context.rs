use crate::Callback;
use std::fmt;

/// Notification sent by a [`NavigationContext`] after its hash changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HashChange {
    /// The hash before the change, `""` or `"#fragment"`
    pub old_hash: String,
    /// The hash after the change, `""` or `"#fragment"`
    pub new_hash: String,
}

/// The host environment a [`HashSync`](crate::HashSync) reads and drives.
///
/// In a browser this is `window.location` plus `window.history`, see
/// [`WebNavigation`](crate::WebNavigation). [`MemoryNavigation`](crate::MemoryNavigation)
/// provides the same behavior without a browser.
///
/// Hashes follow the browser convention: either empty, or `#` followed by the
/// fragment.
pub trait NavigationContext {
    /// The current hash, including its leading `#`, or `""` when there is none.
    fn hash(&self) -> String;

    /// Sets the hash, pushing a history entry. A leading `#` is optional.
    ///
    /// Subscribers are notified some time later, not from within this call.
    fn set_hash(&self, fragment: &str);

    /// Goes back one history entry.
    fn go_back(&self);

    /// Registers a listener for hash changes until the returned [`Subscription`]
    /// is dropped or cancelled.
    fn subscribe(&self, listener: Callback<HashChange>) -> Subscription;
}

/// A registered hash change listener.
///
/// Removes the listener when dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription which runs `unsubscribe` exactly once when cancelled
    /// or dropped.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Removes the listener. Calling this more than once has no effect.
    pub fn cancel(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Turns a fragment (with or without its leading `#`) into a hash.
pub(crate) fn to_hash(fragment: &str) -> String {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        String::new()
    } else {
        format!("#{fragment}")
    }
}
