//! Integration tests for dashboard rendering.
//!
//! These tests drive real tracker state through the public API of both
//! crates and verify the ordering, summary and re-show rules of the
//! rendered view models.

use lifetime_tracker::{LifetimeConfiguration, LifetimeGuard, LifetimeState, LifetimeTracker};
use lifetime_tracker_dashboard::{DashboardPresenter, HideOption, Visibility};

fn quiet_tracker() -> LifetimeTracker {
    LifetimeTracker::builder().on_update(|_| {}).build()
}

fn track_n(
    tracker: &LifetimeTracker,
    configuration: &LifetimeConfiguration,
    name: &'static str,
    n: usize,
) -> Vec<LifetimeGuard> {
    (0..n)
        .map(|_| tracker.track_with(configuration.clone(), name))
        .collect()
}

#[test]
fn sections_are_ordered_most_over_budget_first() {
    let tracker = quiet_tracker();

    let alpha = LifetimeConfiguration::new(5).with_group("alpha");
    let beta = LifetimeConfiguration::new(1).with_group("beta");
    let gamma = LifetimeConfiguration::new(2).with_group("gamma");

    let _alpha = track_n(&tracker, &alpha, "app::Alpha", 1);
    let _beta = track_n(&tracker, &beta, "app::Beta", 3);
    let _gamma = track_n(&tracker, &gamma, "app::Gamma", 2);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    let names: Vec<_> = view_model
        .sections()
        .iter()
        .map(|section| section.name().to_string())
        .collect();

    // beta is two over budget, gamma exactly at it, alpha four under.
    assert_eq!(names, vec!["beta", "gamma", "alpha"]);
}

#[test]
fn sections_with_equal_slack_are_ordered_by_name() {
    let tracker = quiet_tracker();

    let second = LifetimeConfiguration::new(2).with_group("second");
    let first = LifetimeConfiguration::new(2).with_group("first");

    let _second = track_n(&tracker, &second, "app::Second", 1);
    let _first = track_n(&tracker, &first, "app::First", 1);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    let names: Vec<_> = view_model
        .sections()
        .iter()
        .map(|section| section.name().to_string())
        .collect();

    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn sections_with_unlimited_bounds_are_ordered_last() {
    let tracker = quiet_tracker();

    // A bound of usize::MAX declares a type whose instance count never matters.
    let background = LifetimeConfiguration::new(usize::MAX).with_group("background");
    let popups = LifetimeConfiguration::new(1).with_group("popups");

    let _background = track_n(&tracker, &background, "app::Background", 1);
    let _popups = track_n(&tracker, &popups, "app::Popup", 2);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    let names: Vec<_> = view_model
        .sections()
        .iter()
        .map(|section| section.name().to_string())
        .collect();

    // popups is one over budget; background has maximal slack.
    assert_eq!(names, vec!["popups", "background"]);
}

#[test]
fn entries_within_a_section_are_ordered_by_live_count() {
    let tracker = quiet_tracker();
    let configuration = LifetimeConfiguration::new(10).with_group("views");

    let _small = track_n(&tracker, &configuration, "app::Small", 1);
    let _big = track_n(&tracker, &configuration, "app::Big", 3);
    let _aside = track_n(&tracker, &configuration, "app::Aside", 1);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    let section = &view_model.sections()[0];
    let names: Vec<_> = section
        .entries()
        .iter()
        .map(|entry| entry.name().to_string())
        .collect();

    // Highest count first; the two single-instance entries tie and fall
    // back to name order.
    assert_eq!(names, vec!["app::Big", "app::Aside", "app::Small"]);
}

#[test]
fn entry_instance_ids_are_ascending() {
    let tracker = quiet_tracker();
    let configuration = LifetimeConfiguration::new(10).with_group("views");

    let _guards = track_n(&tracker, &configuration, "app::View", 4);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    let ids = view_model.sections()[0].entries()[0].instance_ids();
    assert_eq!(ids.len(), 4);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn summary_lists_leaky_groups_in_descending_key_order() {
    let tracker = quiet_tracker();

    let caches = LifetimeConfiguration::new(1).with_group("caches");
    let pages = LifetimeConfiguration::new(1).with_group("pages");
    let healthy = LifetimeConfiguration::new(9).with_group("healthy");

    let _caches = track_n(&tracker, &caches, "app::Cache", 2);
    let _pages = track_n(&tracker, &pages, "app::Page", 3);
    let _healthy = track_n(&tracker, &healthy, "app::Fine", 1);

    let view_model = DashboardPresenter::default().render(&tracker.groups_snapshot());

    assert_eq!(view_model.summary(), "Leaks: pages (3/1), caches (2/1)");
    assert_eq!(view_model.leaks_count(), 3);
    assert!(view_model.has_issues_to_display());
}

#[test]
fn rendering_the_same_snapshot_twice_is_deterministic() {
    let tracker = quiet_tracker();

    let views = LifetimeConfiguration::new(2).with_group("views");
    let caches = LifetimeConfiguration::new(1).with_group("caches");

    let _views = track_n(&tracker, &views, "app::View", 3);
    let _caches = track_n(&tracker, &caches, "app::Cache", 1);

    let presenter = DashboardPresenter::default();
    let snapshot = tracker.groups_snapshot();

    assert_eq!(presenter.render(&snapshot), presenter.render(&snapshot));
}

#[test]
fn dashboard_surfaces_and_hides_as_leaks_come_and_go() {
    let tracker = quiet_tracker();
    let presenter = DashboardPresenter::new(Visibility::VisibleWithIssuesDetected);
    let configuration = LifetimeConfiguration::new(1).with_group("views");

    let first = tracker.track_with(configuration.clone(), "app::View");
    let frame = presenter.render(&tracker.groups_snapshot());
    assert!(presenter.is_hidden(&frame));

    let second = tracker.track_with(configuration, "app::View");
    let frame = presenter.render(&tracker.groups_snapshot());
    assert!(!presenter.is_hidden(&frame));
    assert_eq!(frame.sections()[0].lifetime_state(), LifetimeState::Leaky);

    drop(second);
    let frame = presenter.render(&tracker.groups_snapshot());
    assert!(presenter.is_hidden(&frame));

    drop(first);
}

#[test]
fn dismissed_dashboard_returns_only_per_its_hide_option() {
    let tracker = quiet_tracker();
    let presenter = DashboardPresenter::default();

    let caches = LifetimeConfiguration::new(0).with_group("caches");
    let pages = LifetimeConfiguration::new(0).with_group("pages");

    let _cache = tracker.track_with(caches.clone(), "app::Cache");
    let hidden = presenter.render(&tracker.groups_snapshot());

    // The known leak grows, and a brand new group starts leaking.
    let _more_cache = tracker.track_with(caches, "app::Cache");
    let _page = tracker.track_with(pages, "app::Page");
    let current = presenter.render(&tracker.groups_snapshot());

    assert!(HideOption::UntilMoreIssues.should_show_again(&hidden, &current));
    assert!(HideOption::UntilNewIssueType.should_show_again(&hidden, &current));
    assert!(!HideOption::Always.should_show_again(&hidden, &current));
    assert!(!HideOption::None.should_show_again(&hidden, &current));
}
