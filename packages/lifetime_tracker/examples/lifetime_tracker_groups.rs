//! Example demonstrating group aggregation and leak callbacks.
//!
//! Several types share a named group, one group caps its total with an
//! explicit maximum and a leak callback reports each violation as it happens.

use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};

fn main() {
    println!("=== Lifetime Tracker Groups Example ===\n");

    let tracker = LifetimeTracker::builder()
        .on_update(|_| {})
        .on_leak_detected(|entry, group| {
            println!(
                "leak: {} has {} live instances (max {}) in group '{}'",
                entry.name(),
                entry.count(),
                entry.max_count(),
                group.display_name()
            );
        })
        .build();

    // 1. Types sharing a group pool their allowances by default.
    println!("1. Shared group, summed maximums:");

    let image_cache = LifetimeConfiguration::new(2).with_group("caches");
    let page_cache = LifetimeConfiguration::new(1).with_group("caches");

    let _images = [
        tracker.track_with(image_cache.clone(), "app::ImageCache"),
        tracker.track_with(image_cache, "app::ImageCache"),
    ];

    // The second page cache exceeds its bound, so the callback fires here.
    let _pages = [
        tracker.track_with(page_cache.clone(), "app::PageCache"),
        tracker.track_with(page_cache, "app::PageCache"),
    ];

    let groups = tracker.groups_snapshot();
    let caches = groups.get("caches").expect("group was just populated");
    println!(
        "   group 'caches': {} live, max {}\n",
        caches.count(),
        caches.max_count()
    );

    // 2. An explicit group maximum replaces the summed one.
    println!("2. Explicit group maximum:");

    let connection = LifetimeConfiguration::new(4)
        .with_group("connections")
        .with_group_max_count(2);

    let _connections = [
        tracker.track_with(connection.clone(), "app::Connection"),
        tracker.track_with(connection.clone(), "app::Connection"),
        tracker.track_with(connection, "app::Connection"),
    ];

    let groups = tracker.groups_snapshot();
    let connections = groups.get("connections").expect("group was just populated");
    println!(
        "   group 'connections': {} live, max {}\n",
        connections.count(),
        connections.max_count()
    );

    // 3. The report lists only groups that exceeded their bound.
    println!("3. Leak report:");
    tracker.print_to_stdout();
}
