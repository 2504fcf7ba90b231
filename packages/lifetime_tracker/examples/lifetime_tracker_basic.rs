//! Example that demonstrates installing a process-wide lifetime tracker.
//!
//! This shows the typical integration: install a tracker at startup, give each
//! observed type a `Trackable` implementation and hold the returned guard in a
//! field so the instance is counted for exactly as long as it is alive.

use lifetime_tracker::{
    EntriesGroup, LifetimeConfiguration, LifetimeGuard, LifetimeTracker, Trackable,
};

struct DetailView {
    _lifetime: Option<LifetimeGuard>,
}

impl Trackable for DetailView {
    fn lifetime_configuration() -> LifetimeConfiguration {
        LifetimeConfiguration::new(1).with_group("views")
    }
}

impl DetailView {
    fn new() -> Self {
        Self {
            _lifetime: Self::track_lifetime(),
        }
    }
}

fn main() {
    println!("=== Lifetime Tracker Basic Example ===");

    LifetimeTracker::builder()
        .on_update(|groups| {
            let live: usize = groups.values().map(EntriesGroup::count).sum();
            println!("update: {live} live instance(s)");
        })
        .install();

    let first = DetailView::new();

    // One more instance than the configuration allows, so the report flags it.
    let second = DetailView::new();

    let tracker = LifetimeTracker::instance().expect("installed above");
    tracker.print_to_stdout();

    drop(second);
    drop(first);

    assert!(tracker.is_empty());
    println!("All instances released.");

    LifetimeTracker::uninstall();
    println!("Basic example completed successfully!");
}
