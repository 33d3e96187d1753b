use crate::{
    context::{HashChange, NavigationContext, Subscription},
    Callback, FragmentTracking,
};
use log::{debug, trace};
use std::{cell::RefCell, fmt, rc::Rc};

/// Decides whether the tracked section is visible after the hash became `hash`,
/// updating `tracked` on the way.
///
/// - An empty hash clears `tracked` and hides the section.
/// - A hash equal to `"#" + tracked` shows it.
/// - Any other hash becomes the new `tracked` value (see [`FragmentTracking`])
///   and hides the section.
pub fn next_visibility(tracked: &mut String, hash: &str, tracking: FragmentTracking) -> bool {
    if hash.is_empty() {
        tracked.clear();
        false
    } else if hash == format!("#{tracked}") {
        true
    } else {
        *tracked = tracking.record(hash);
        false
    }
}

/// Builder for [`HashSync`]s.
///
/// Begin with [`HashSyncBuilder::new`], set an observer with
/// [`HashSyncBuilder::on_visibility_change`] and call [`HashSyncBuilder::build`].
#[derive(Debug)]
pub struct HashSyncBuilder<C> {
    pub(crate) context: C,
    pub(crate) tracking: FragmentTracking,
    pub(crate) observer: Callback<bool>,
}

impl<C: NavigationContext + 'static> HashSyncBuilder<C> {
    /// Creates a builder for the given host with verbatim tracking and a no-op
    /// observer.
    pub fn new(context: C) -> Self {
        Self {
            context,
            tracking: FragmentTracking::default(),
            observer: Callback::noop(),
        }
    }

    /// Sets how foreign hashes are recorded.
    pub fn tracking(mut self, tracking: FragmentTracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Sets the function told whether the section should be shown.
    pub fn on_visibility_change(mut self, observer: impl Into<Callback<bool>>) -> Self {
        self.observer = observer.into();
        self
    }

    /// Subscribes to the host and returns the running [`HashSync`].
    pub fn build(self) -> HashSync<C> {
        let context = Rc::new(self.context);
        let tracked = Rc::new(RefCell::new(String::new()));

        let listener = {
            let context = Rc::downgrade(&context);
            let tracked = tracked.clone();
            let observer = self.observer.clone();
            let tracking = self.tracking;
            Callback::from(move |event: HashChange| {
                let Some(context) = context.upgrade() else {
                    return;
                };
                trace!("hash changed {:?} -> {:?}", event.old_hash, event.new_hash);
                let hash = context.hash();
                let visible = {
                    let mut tracked = tracked.borrow_mut();
                    let visible = next_visibility(&mut tracked, &hash, tracking);
                    debug!("hash {hash:?}, tracking {tracked:?}, visible: {visible}");
                    visible
                };
                observer.emit(visible);
            })
        };
        let subscription = context.subscribe(listener);

        HashSync {
            context,
            tracked,
            observer: self.observer,
            subscription: Some(subscription),
        }
    }
}

/// Keeps a section's visibility in sync with the hash of a [`NavigationContext`].
///
/// The observer is only ever called from hash change notifications, plus once from
/// [`HashSync::clear_section`] when there is no hash to go back from.
///
/// ```
/// use hashsync::{HashSync, MemoryNavigation, VisibilityCell};
///
/// let nav = MemoryNavigation::new();
/// let visible = VisibilityCell::default();
/// let sync = HashSync::new(nav.clone(), visible.observer());
///
/// sync.navigate_to_section("options");
/// nav.dispatch_pending();
/// assert!(visible.get());
///
/// sync.clear_section();
/// nav.dispatch_pending();
/// assert!(!visible.get());
/// ```
pub struct HashSync<C: NavigationContext> {
    context: Rc<C>,
    tracked: Rc<RefCell<String>>,
    observer: Callback<bool>,
    subscription: Option<Subscription>,
}

impl<C: NavigationContext + 'static> HashSync<C> {
    /// Starts syncing with verbatim tracking, reporting to `observer`.
    pub fn new(context: C, observer: impl Into<Callback<bool>>) -> Self {
        HashSyncBuilder::new(context)
            .on_visibility_change(observer)
            .build()
    }

    /// Creates a [`HashSyncBuilder`].
    pub fn builder(context: C) -> HashSyncBuilder<C> {
        HashSyncBuilder::new(context)
    }
}

impl<C: NavigationContext> HashSync<C> {
    /// Sets the hash to `section` and starts tracking it.
    ///
    /// The observer hears `true` once the host delivers the resulting hash change.
    pub fn navigate_to_section(&self, section: &str) {
        debug!("navigating to section {section:?}");
        self.context.set_hash(section);
        *self.tracked.borrow_mut() = section.to_owned();
    }

    /// Goes back one history entry, which normally removes the section's hash.
    ///
    /// If there is no hash at all the observer is told `false` right away.
    pub fn clear_section(&self) {
        if self.context.hash().is_empty() {
            debug!("clearing section without a hash");
            self.observer.emit(false);
        }
        self.context.go_back();
    }

    /// The fragment currently tracked, `""` if none.
    pub fn tracked_fragment(&self) -> String {
        self.tracked.borrow().clone()
    }

    /// The host this instance is synced with.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Whether hash changes still reach this instance.
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .map(Subscription::is_active)
            .unwrap_or(false)
    }

    /// Stops listening for hash changes. Dropping the `HashSync` does the same.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            debug!("removing hash change listener");
            subscription.cancel();
        }
    }
}

impl<C: NavigationContext> Drop for HashSync<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<C: NavigationContext> fmt::Debug for HashSync<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSync")
            .field("tracked", &*self.tracked.borrow())
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visibility(tracked: &str, hash: &str, tracking: FragmentTracking) -> (bool, String) {
        let mut tracked = tracked.to_owned();
        let visible = next_visibility(&mut tracked, hash, tracking);
        (visible, tracked)
    }

    #[test]
    fn empty_hash_hides_and_resets() {
        assert_eq!(
            visibility("test", "", FragmentTracking::Verbatim),
            (false, String::new())
        );
    }

    #[test]
    fn matching_hash_shows() {
        assert_eq!(
            visibility("test", "#test", FragmentTracking::Verbatim),
            (true, "test".to_string())
        );
    }

    #[test]
    fn foreign_hash_is_tracked_verbatim() {
        assert_eq!(
            visibility("test", "#other", FragmentTracking::Verbatim),
            (false, "#other".to_string())
        );
    }

    #[test]
    fn foreign_hash_is_tracked_normalized() {
        assert_eq!(
            visibility("test", "#other", FragmentTracking::Normalized),
            (false, "other".to_string())
        );
    }

    #[test]
    fn verbatim_tracking_compares_against_double_hash() {
        assert_eq!(
            visibility("#other", "#other", FragmentTracking::Verbatim),
            (false, "#other".to_string())
        );
        assert_eq!(
            visibility("#other", "##other", FragmentTracking::Verbatim),
            (true, "#other".to_string())
        );
    }

    #[test]
    fn nothing_tracked_and_some_hash() {
        assert_eq!(
            visibility("", "#", FragmentTracking::Verbatim),
            (true, String::new())
        );
        assert_eq!(
            visibility("", "#a", FragmentTracking::Verbatim),
            (false, "#a".to_string())
        );
    }
}
