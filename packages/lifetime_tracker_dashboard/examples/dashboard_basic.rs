//! Example that renders a text dashboard from tracker updates.
//!
//! Every lifetime event re-renders the view model; the "UI" here is plain
//! stdout, printed only when the visibility policy says the dashboard
//! should be on screen.

use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
use lifetime_tracker_dashboard::{DashboardPresenter, Visibility};

fn main() {
    println!("=== Lifetime Tracker Dashboard Example ===\n");

    let presenter = DashboardPresenter::new(Visibility::VisibleWithIssuesDetected);

    let tracker = LifetimeTracker::builder()
        .on_update(move |groups| {
            let frame = presenter.render(groups);
            if presenter.is_hidden(&frame) {
                return;
            }

            println!("{}", frame.summary());
            for section in frame.sections() {
                println!("  {}", section.title());
                for entry in section.entries() {
                    println!("    {} x{}", entry.name(), entry.count());
                }
            }
            println!();
        })
        .build();

    let view = LifetimeConfiguration::new(1).with_group("views");
    let cache = LifetimeConfiguration::new(2).with_group("caches");

    println!("Tracking instances within bounds; the dashboard stays quiet.");
    let first_view = tracker.track_with(view.clone(), "app::DetailView");
    let _cache = tracker.track_with(cache, "app::ImageCache");

    println!("Creating one view too many; the dashboard appears.\n");
    let second_view = tracker.track_with(view, "app::DetailView");

    println!("Releasing the extra view; the dashboard goes quiet again.");
    drop(second_view);
    drop(first_view);

    println!("\nDashboard example completed successfully!");
}
