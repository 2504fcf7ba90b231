use std::cmp::Ordering;
use std::fmt::Write as _;

use lifetime_tracker::{LifetimeState, TrackedGroups};

use crate::{DashboardViewModel, GroupModel, Visibility};

const NO_ISSUES_SUMMARY: &str = "No issues detected";
const LEAKS_SUMMARY_PREFIX: &str = "Leaks: ";

/// Turns tracker snapshots into deterministic [`DashboardViewModel`]s.
///
/// The presenter is a pure function from snapshot to view model plus a
/// [`Visibility`] policy; it keeps no state of its own, so one instance can
/// serve every update callback invocation.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
/// use lifetime_tracker_dashboard::DashboardPresenter;
///
/// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
/// let presenter = DashboardPresenter::default();
///
/// let _page = tracker.track_with(
///     LifetimeConfiguration::new(1).with_group("pages"),
///     "app::Page",
/// );
///
/// let view_model = presenter.render(&tracker.groups_snapshot());
/// assert_eq!(view_model.summary(), "No issues detected");
/// assert_eq!(view_model.sections().len(), 1);
///
/// // Nothing is over budget, so the default policy keeps the dashboard hidden.
/// assert!(presenter.is_hidden(&view_model));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DashboardPresenter {
    visibility: Visibility,
}

impl DashboardPresenter {
    /// Creates a presenter with the given visibility policy.
    #[must_use]
    pub fn new(visibility: Visibility) -> Self {
        Self { visibility }
    }

    /// The visibility policy this presenter consults in [`is_hidden`][Self::is_hidden].
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Builds the view model for one frame from a tracker snapshot.
    ///
    /// Sections cover the named groups with live instances, most over budget
    /// first. The summary line and issue flag consider every tracked group,
    /// including the unnamed bucket that never becomes a section.
    #[must_use]
    pub fn render(&self, groups: &TrackedGroups) -> DashboardViewModel {
        let mut sections: Vec<GroupModel> = groups
            .values()
            .filter(|group| group.name().is_some() && group.count() > 0)
            .map(GroupModel::from_group)
            .collect();
        sections.sort_unstable_by(compare_over_budget_first);

        let leaks_count = sections
            .iter()
            .flat_map(GroupModel::entries)
            .filter(|entry| entry.lifetime_state() == LifetimeState::Leaky)
            .map(|entry| entry.count().saturating_sub(entry.max_count()))
            .sum();

        let has_issues_to_display = groups
            .values()
            .any(|group| group.lifetime_state() == LifetimeState::Leaky);

        let summary = build_summary(groups);

        DashboardViewModel::new(leaks_count, summary, sections, has_issues_to_display)
    }

    /// Whether the dashboard should currently be hidden for this view model.
    #[must_use]
    pub fn is_hidden(&self, view_model: &DashboardViewModel) -> bool {
        self.visibility.is_hidden(view_model.has_issues_to_display())
    }
}

// Most over-budget section first. The slack max_count - count can be negative,
// so compare cross sums instead: a.max + b.count against b.max + a.count.
// The sums are formed in u128 because a maximum of usize::MAX is legal.
fn compare_over_budget_first(a: &GroupModel, b: &GroupModel) -> Ordering {
    let a_key = cross_sum(a.max_count(), b.count());
    let b_key = cross_sum(b.max_count(), a.count());

    a_key.cmp(&b_key).then_with(|| a.name().cmp(b.name()))
}

fn cross_sum(max_count: usize, count: usize) -> u128 {
    (max_count as u128)
        .checked_add(count as u128)
        .expect("the sum of two usize values fits in u128")
}

fn build_summary(groups: &TrackedGroups) -> String {
    let mut leaky: Vec<_> = groups
        .iter()
        .filter(|(_, group)| group.lifetime_state() == LifetimeState::Leaky)
        .collect();

    if leaky.is_empty() {
        return String::from(NO_ISSUES_SUMMARY);
    }

    leaky.sort_unstable_by(|(a, _), (b, _)| b.cmp(a));

    let mut summary = String::from(LEAKS_SUMMARY_PREFIX);
    for (index, (_, group)) in leaky.iter().enumerate() {
        if index > 0 {
            summary.push_str(", ");
        }
        write!(
            summary,
            "{} ({}/{})",
            group.display_name(),
            group.count(),
            group.max_count()
        )
        .expect("writing to a String cannot fail");
    }

    summary
}
