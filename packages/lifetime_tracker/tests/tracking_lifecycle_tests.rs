//! Integration tests for full tracking lifecycles.
//!
//! These tests drive the public API end to end: registration through guards,
//! aggregation into groups, callback observation and the global instance plumbing.

use std::any::type_name;
use std::panic::catch_unwind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use lifetime_tracker::{
    EntriesGroup, Entry, LifetimeConfiguration, LifetimeTracker, Trackable, TrackedGroups,
};

struct Avatar;

impl Trackable for Avatar {
    fn lifetime_configuration() -> LifetimeConfiguration {
        LifetimeConfiguration::new(2).with_group("profile")
    }
}

struct Banner;

impl Trackable for Banner {
    fn lifetime_configuration() -> LifetimeConfiguration {
        LifetimeConfiguration::new(1).with_group("profile")
    }
}

fn quiet_tracker() -> LifetimeTracker {
    LifetimeTracker::builder().on_update(|_| {}).build()
}

fn group_count(groups: &TrackedGroups, name: &str) -> usize {
    groups.get(name).map_or(0, EntriesGroup::count)
}

#[test]
fn constructions_minus_drops_equals_live_count() {
    const CONSTRUCTED: usize = 5;
    const DROPPED: usize = 3;

    let tracker = quiet_tracker();

    let mut guards = Vec::new();
    for _ in 0..CONSTRUCTED {
        guards.push(tracker.track::<Avatar>());
    }

    guards.truncate(CONSTRUCTED - DROPPED);

    let groups = tracker.groups_snapshot();
    assert_eq!(group_count(&groups, "profile"), CONSTRUCTED - DROPPED);

    let entry = groups
        .get("profile")
        .and_then(|group| group.entry(type_name::<Avatar>()))
        .expect("entry exists after tracking");
    assert_eq!(entry.count(), CONSTRUCTED - DROPPED);
    assert_eq!(entry.instance_ids().count(), CONSTRUCTED - DROPPED);
}

#[test]
fn types_sharing_a_group_aggregate() {
    let tracker = quiet_tracker();

    let _avatar = tracker.track::<Avatar>();
    let _banner = tracker.track::<Banner>();

    let groups = tracker.groups_snapshot();
    let group = groups.get("profile").expect("group exists");

    // Summed default: Avatar contributes 2, Banner contributes 1.
    assert_eq!(group.max_count(), 3);
    assert_eq!(group.count(), 2);
    assert_eq!(group.entries().count(), 2);
}

#[test]
fn leak_appears_and_clears_with_guard_lifetimes() {
    let tracker = quiet_tracker();
    let configuration = LifetimeConfiguration::new(1).with_group("downloads");

    let first = tracker.track_with(configuration.clone(), "app::Download");
    assert!(tracker.to_report().is_empty());

    let second = tracker.track_with(configuration, "app::Download");
    let report = tracker.to_report();
    assert!(!report.is_empty());
    assert_eq!(
        report.groups().next().map(|group| group.name().to_string()),
        Some("downloads".to_string())
    );

    drop(second);
    assert!(tracker.to_report().is_empty());

    drop(first);
    let groups = tracker.groups_snapshot();
    assert_eq!(group_count(&groups, "downloads"), 0);
}

#[test]
fn update_callback_sees_every_transition() {
    let counts = Arc::new(Mutex::new(Vec::new()));

    let tracker = {
        let counts = Arc::clone(&counts);
        LifetimeTracker::builder()
            .on_update(move |groups| {
                let live: usize = groups.values().map(EntriesGroup::count).sum();
                counts.lock().expect("no poisoned locks in tests").push(live);
            })
            .build()
    };

    let configuration = LifetimeConfiguration::new(2);
    let first = tracker.track_with(configuration.clone(), "app::Step");
    let second = tracker.track_with(configuration, "app::Step");
    drop(first);
    drop(second);

    let observed = counts.lock().expect("no poisoned locks in tests").clone();
    assert_eq!(observed, vec![1, 2, 1, 0]);
}

#[test]
fn group_count_always_matches_entry_sum_in_callbacks() {
    let violations = Arc::new(AtomicUsize::new(0));

    let tracker = {
        let violations = Arc::clone(&violations);
        LifetimeTracker::builder()
            .on_update(move |groups| {
                for group in groups.values() {
                    let entry_total: usize = group.entries().map(Entry::count).sum();
                    if entry_total != group.count() {
                        violations.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
            .build()
    };

    let mut guards = Vec::new();
    for _ in 0..4 {
        guards.push(tracker.track::<Avatar>());
        guards.push(tracker.track::<Banner>());
    }
    guards.clear();

    assert_eq!(violations.load(Ordering::Relaxed), 0);
}

#[test]
fn callbacks_may_reenter_the_tracker() {
    static TRACKER: OnceLock<LifetimeTracker> = OnceLock::new();

    let nested_counts = Arc::new(AtomicUsize::new(0));

    let tracker = {
        let nested_counts = Arc::clone(&nested_counts);
        LifetimeTracker::builder()
            .on_update(|_| {})
            .on_leak_detected(move |_entry, _group| {
                // Register a probe from inside the callback; the lock is
                // re-entrant, so this must not deadlock.
                let tracker = TRACKER.get().expect("tracker stored before tracking");
                let probe =
                    tracker.track_with(LifetimeConfiguration::new(10), "app::LeakProbe");
                nested_counts.fetch_add(1, Ordering::Relaxed);
                drop(probe);
            })
            .build()
    };

    TRACKER.set(tracker.clone()).expect("set exactly once");

    let configuration = LifetimeConfiguration::new(0);
    let guard = tracker.track_with(configuration, "app::Overdrawn");
    drop(guard);

    assert_eq!(nested_counts.load(Ordering::Relaxed), 1);

    let groups = tracker.groups_snapshot();
    let probe_entry = groups
        .values()
        .flat_map(EntriesGroup::entries)
        .find(|entry| entry.name() == "app::LeakProbe")
        .expect("nested registration reached the shared state");
    assert_eq!(probe_entry.count(), 0);
}

#[test]
fn global_install_lifecycle() {
    // All global-instance coverage lives in this one test because the global slot
    // is shared by every test in the process.
    assert!(LifetimeTracker::instance().is_none());
    assert!(Avatar::track_lifetime().is_none());

    LifetimeTracker::builder()
        .on_update(|_| {})
        .try_install()
        .expect("no tracker installed yet");

    let tracker = LifetimeTracker::instance().expect("tracker was just installed");

    let guard = Avatar::track_lifetime().expect("tracking uses the installed tracker");
    assert!(!tracker.is_empty());

    // A second install must be refused, both politely and loudly.
    assert!(
        LifetimeTracker::builder()
            .on_update(|_| {})
            .try_install()
            .is_err()
    );
    let panicked = catch_unwind(|| {
        LifetimeTracker::builder().on_update(|_| {}).install();
    });
    assert!(panicked.is_err());

    drop(guard);
    assert!(tracker.is_empty());

    LifetimeTracker::uninstall();
    assert!(LifetimeTracker::instance().is_none());

    // The slot is reusable after an uninstall.
    LifetimeTracker::builder().on_update(|_| {}).install();
    assert!(LifetimeTracker::instance().is_some());
    LifetimeTracker::uninstall();
}
