use hashsync::{
    Callback, FragmentTracking, HashChange, HashSync, MemoryNavigation, NavigationContext,
    Subscription,
};
use std::{cell::RefCell, rc::Rc};

type Signals = Rc<RefCell<Vec<bool>>>;

fn synced(nav: &MemoryNavigation) -> (HashSync<MemoryNavigation>, Signals) {
    let _ = pretty_env_logger::try_init();
    let signals = Signals::default();
    let sync = HashSync::new(nav.clone(), {
        let signals = signals.clone();
        move |visible: bool| signals.borrow_mut().push(visible)
    });
    (sync, signals)
}

#[test]
fn navigate_signals_visible_once_delivered() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    assert!(signals.borrow().is_empty(), "delivery is not synchronous");
    assert_eq!(sync.tracked_fragment(), "test");

    assert_eq!(nav.dispatch_pending(), 1);
    assert_eq!(*signals.borrow(), vec![true]);
    assert_eq!(nav.url(), "http://localhost/#test");
}

#[test]
fn navigate_accepts_any_section() {
    for section in ["a", "options", "with space", "äöü", "#prefixed"] {
        let nav = MemoryNavigation::new();
        let (sync, signals) = synced(&nav);

        sync.navigate_to_section(section);
        nav.dispatch_pending();

        let expected = !section.starts_with('#');
        assert_eq!(*signals.borrow(), vec![expected], "section {section:?}");
    }
}

#[test]
fn clear_without_hash_hides_immediately() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.clear_section();

    assert_eq!(*signals.borrow(), vec![false]);
    assert_eq!(nav.pending(), 0);
    assert_eq!(nav.hash(), "");
}

#[test]
fn navigate_then_clear_ends_hidden() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    nav.dispatch_pending();
    sync.clear_section();
    assert_eq!(*signals.borrow(), vec![true], "clearing waits for the host");

    nav.dispatch_pending();
    assert_eq!(*signals.borrow(), vec![true, false]);
    assert!(!nav.url().contains("#test"));
    assert_eq!(sync.tracked_fragment(), "");
}

#[test]
fn navigate_then_clear_before_delivery_ends_hidden() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    sync.clear_section();
    nav.dispatch_pending();

    assert_eq!(signals.borrow().last(), Some(&false));
    assert!(!signals.borrow().contains(&true));
    assert!(!nav.url().contains("#test"));
}

#[test]
fn external_hash_change_hides_and_is_tracked() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    nav.dispatch_pending();

    // the user edits the url
    nav.set_hash("other");
    nav.dispatch_pending();

    assert_eq!(*signals.borrow(), vec![true, false]);
    assert_eq!(sync.tracked_fragment(), "#other");
}

#[test]
fn external_hash_change_normalized() {
    let nav = MemoryNavigation::new();
    let signals = Signals::default();
    let sync = HashSync::builder(nav.clone())
        .tracking(FragmentTracking::Normalized)
        .on_visibility_change({
            let signals = signals.clone();
            move |visible: bool| signals.borrow_mut().push(visible)
        })
        .build();

    nav.set_hash("other");
    nav.dispatch_pending();

    assert_eq!(*signals.borrow(), vec![false]);
    assert_eq!(sync.tracked_fragment(), "other");
}

#[test]
fn navigating_twice_to_same_section_signals_once() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    sync.navigate_to_section("test");
    nav.dispatch_pending();

    assert_eq!(*signals.borrow(), vec![true]);
    assert_eq!(nav.history_len(), 2);
}

#[test]
fn switching_sections_then_clearing() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("a");
    nav.dispatch_pending();
    sync.navigate_to_section("b");
    nav.dispatch_pending();
    assert_eq!(*signals.borrow(), vec![true, true]);

    // back lands on #a, which is no longer the tracked section
    sync.clear_section();
    nav.dispatch_pending();
    assert_eq!(*signals.borrow(), vec![true, true, false]);
    assert_eq!(sync.tracked_fragment(), "#a");
    assert_eq!(nav.hash(), "#a");
}

#[test]
fn forward_after_back_stays_hidden() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);

    sync.navigate_to_section("test");
    nav.dispatch_pending();
    nav.go_back();
    nav.dispatch_pending();
    nav.go_forward();
    nav.dispatch_pending();

    assert_eq!(*signals.borrow(), vec![true, false, false]);
    assert_eq!(sync.tracked_fragment(), "#test");
}

#[test]
fn drop_removes_listener() {
    let nav = MemoryNavigation::new();
    let (sync, signals) = synced(&nav);
    assert_eq!(nav.listener_count(), 1);
    assert!(sync.is_subscribed());

    sync.navigate_to_section("test");
    drop(sync);
    assert_eq!(nav.listener_count(), 0);

    nav.dispatch_pending();
    assert!(signals.borrow().is_empty());
}

#[test]
fn teardown_is_idempotent() {
    let nav = MemoryNavigation::new();
    let (mut sync, signals) = synced(&nav);

    sync.teardown();
    sync.teardown();
    assert!(!sync.is_subscribed());
    assert_eq!(nav.listener_count(), 0);

    nav.set_hash("test");
    nav.dispatch_pending();
    assert!(signals.borrow().is_empty());
}

#[test]
fn observer_may_navigate() {
    let nav = MemoryNavigation::new();
    let signals = Signals::default();

    // hide the section again as soon as it opens
    let sync = HashSync::new(nav.clone(), {
        let signals = signals.clone();
        let nav = nav.clone();
        move |visible: bool| {
            signals.borrow_mut().push(visible);
            if visible {
                nav.go_back();
            }
        }
    });

    sync.navigate_to_section("test");
    assert_eq!(nav.dispatch_pending(), 2);
    assert_eq!(*signals.borrow(), vec![true, false]);
}

/// A host that notifies synchronously and even when the hash did not change.
#[derive(Default)]
struct EagerHost {
    hash: RefCell<String>,
    listeners: Rc<RefCell<Vec<Callback<HashChange>>>>,
}

impl EagerHost {
    fn notify(&self, old_hash: String) {
        let change = HashChange {
            old_hash,
            new_hash: self.hash.borrow().clone(),
        };
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener.emit(change.clone());
        }
    }
}

impl NavigationContext for EagerHost {
    fn hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn set_hash(&self, fragment: &str) {
        let old = self.hash.replace(format!("#{fragment}"));
        self.notify(old);
    }

    fn go_back(&self) {
        let old = self.hash.replace(String::new());
        self.notify(old);
    }

    fn subscribe(&self, listener: Callback<HashChange>) -> Subscription {
        self.listeners.borrow_mut().push(listener);
        let listeners = self.listeners.clone();
        Subscription::new(move || listeners.borrow_mut().clear())
    }
}

#[test]
fn duplicate_notifications_repeat_the_signal() {
    let signals = Signals::default();
    let sync = HashSync::new(EagerHost::default(), {
        let signals = signals.clone();
        move |visible: bool| signals.borrow_mut().push(visible)
    });

    // notified before the fragment is recorded, then again for the same hash
    sync.navigate_to_section("test");
    sync.navigate_to_section("test");

    assert_eq!(*signals.borrow(), vec![false, true]);
    assert_eq!(sync.tracked_fragment(), "test");
}

#[test]
fn verbatim_tracking_never_matches_a_foreign_hash() {
    let signals = Signals::default();
    let host = EagerHost::default();
    let sync = HashSync::new(host, {
        let signals = signals.clone();
        move |visible: bool| signals.borrow_mut().push(visible)
    });

    sync.context().set_hash("other");
    sync.context().set_hash("other");

    assert_eq!(*signals.borrow(), vec![false, false]);
    assert_eq!(sync.tracked_fragment(), "#other");
}

#[test]
fn normalized_tracking_matches_a_repeated_foreign_hash() {
    let signals = Signals::default();
    let sync = HashSync::builder(EagerHost::default())
        .tracking(FragmentTracking::Normalized)
        .on_visibility_change({
            let signals = signals.clone();
            move |visible: bool| signals.borrow_mut().push(visible)
        })
        .build();

    sync.context().set_hash("other");
    sync.context().set_hash("other");

    assert_eq!(*signals.borrow(), vec![false, true]);
    assert_eq!(sync.tracked_fragment(), "other");
}
