use lifetime_tracker::{EntriesGroup, Entry, InstanceId, LifetimeState};

/// Display data for one tracked type within a dashboard section.
///
/// Owned snapshot data; holding or shipping it to another thread does not
/// keep any tracker state alive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryModel {
    name: String,
    count: usize,
    max_count: usize,
    lifetime_state: LifetimeState,
    instance_ids: Vec<InstanceId>,
}

impl EntryModel {
    pub(crate) fn from_entry(entry: &Entry) -> Self {
        let mut instance_ids: Vec<_> = entry.instance_ids().collect();
        instance_ids.sort_unstable();

        Self {
            name: entry.name().to_string(),
            count: entry.count(),
            max_count: entry.max_count(),
            lifetime_state: entry.lifetime_state(),
            instance_ids,
        }
    }

    /// Display name of the tracked type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of live instances at snapshot time.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Configured maximum number of live instances.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Classification of the entry at snapshot time.
    #[must_use]
    pub fn lifetime_state(&self) -> LifetimeState {
        self.lifetime_state
    }

    /// Identity tokens of the live instances, in ascending order.
    #[must_use]
    pub fn instance_ids(&self) -> &[InstanceId] {
        &self.instance_ids
    }
}

/// Display data for one dashboard section.
///
/// Member entries are filtered to those with live instances and ordered by
/// live count, highest first, with ties broken by name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupModel {
    name: String,
    count: usize,
    max_count: usize,
    lifetime_state: LifetimeState,
    entries: Vec<EntryModel>,
}

impl GroupModel {
    pub(crate) fn from_group(group: &EntriesGroup) -> Self {
        let mut entries: Vec<_> = group
            .entries()
            .filter(|entry| entry.count() > 0)
            .map(EntryModel::from_entry)
            .collect();
        entries.sort_unstable_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            name: group.display_name().to_string(),
            count: group.count(),
            max_count: group.max_count(),
            lifetime_state: group.lifetime_state(),
            entries,
        }
    }

    /// Display name of the group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Section heading in `name (count/max)` form.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({}/{})", self.name, self.count, self.max_count)
    }

    /// Total live instances across the member entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Effective maximum for the group.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Classification of the group at snapshot time.
    #[must_use]
    pub fn lifetime_state(&self) -> LifetimeState {
        self.lifetime_state
    }

    /// Member entries with live instances, highest count first.
    #[must_use]
    pub fn entries(&self) -> &[EntryModel] {
        &self.entries
    }
}

/// Everything a dashboard needs to draw one frame.
///
/// Produced by [`DashboardPresenter::render`][crate::DashboardPresenter::render]
/// from a tracker snapshot. The view model is plain owned data, so an update
/// callback can hand it to a UI thread without further synchronization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DashboardViewModel {
    leaks_count: usize,
    summary: String,
    sections: Vec<GroupModel>,
    has_issues_to_display: bool,
}

impl DashboardViewModel {
    pub(crate) fn new(
        leaks_count: usize,
        summary: String,
        sections: Vec<GroupModel>,
        has_issues_to_display: bool,
    ) -> Self {
        Self {
            leaks_count,
            summary,
            sections,
            has_issues_to_display,
        }
    }

    /// Total number of instances beyond their configured bounds.
    #[must_use]
    pub fn leaks_count(&self) -> usize {
        self.leaks_count
    }

    /// One-line status suitable for a title bar.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Sections to display, most over budget first.
    #[must_use]
    pub fn sections(&self) -> &[GroupModel] {
        &self.sections
    }

    /// Whether any tracked group currently exceeds its bounds.
    #[must_use]
    pub fn has_issues_to_display(&self) -> bool {
        self.has_issues_to_display
    }
}
