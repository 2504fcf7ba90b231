//! Reports of groups exceeding their configured bounds.

use std::fmt;

use crate::{LifetimeState, TrackedGroups};

/// Snapshot of the groups that were exceeding their bounds when the report was
/// created.
///
/// A `LeakReport` is owned and detached: it can be sent to other threads, stored,
/// or printed after the tracked state has moved on. Groups appear sorted descending
/// by group key, the bucket of ungrouped types under its reserved key among them.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
///
/// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
///
/// let configuration = LifetimeConfiguration::new(1).with_group("parsers");
/// let _first = tracker.track_with(configuration.clone(), "demo::Parser");
/// let _second = tracker.track_with(configuration, "demo::Parser");
///
/// let report = tracker.to_report();
/// assert!(!report.is_empty());
///
/// for group in report.groups() {
///     println!("{} is over budget: {}/{}", group.name(), group.count(), group.max_count());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct LeakReport {
    groups: Vec<ReportGroup>,
}

/// One over-bound group in a [`LeakReport`].
#[derive(Clone, Debug)]
pub struct ReportGroup {
    name: String,
    count: usize,
    max_count: usize,
}

impl LeakReport {
    /// Creates a report from a snapshot of tracked state, keeping only the groups
    /// currently classified as leaky.
    #[must_use]
    pub fn from_groups(groups: &TrackedGroups) -> Self {
        let mut leaky: Vec<_> = groups
            .iter()
            .filter(|(_, group)| group.lifetime_state() == LifetimeState::Leaky)
            .collect();

        leaky.sort_by(|a, b| b.0.cmp(a.0));

        let groups = leaky
            .into_iter()
            .map(|(_, group)| ReportGroup {
                name: group.display_name().to_string(),
                count: group.count(),
                max_count: group.max_count(),
            })
            .collect();

        Self { groups }
    }

    /// Whether no group was over its bound when the report was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The over-bound groups, sorted descending by group key.
    pub fn groups(&self) -> impl Iterator<Item = &ReportGroup> {
        self.groups.iter()
    }

    /// Prints the report to stdout.
    ///
    /// Prints nothing if no group was over its bound, not even an empty line, so
    /// tooling that treats any output as a failure signal can rely on silence.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        if self.is_empty() {
            return;
        }
        println!("{self}");
    }
}

impl ReportGroup {
    /// The group's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live instances in the group when the report was created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The group's configured maximum when the report was created.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }
}

impl fmt::Display for ReportGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.count, self.max_count)
    }
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            writeln!(f, "No leaks detected.")?;
        } else {
            writeln!(f, "Leaks detected:")?;

            for group in &self.groups {
                writeln!(f, "  {group}")?;
            }
        }
        Ok(())
    }
}
