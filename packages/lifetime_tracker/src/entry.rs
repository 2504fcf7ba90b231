//! Per-type live-instance accounting.

use foldhash::{HashSet, HashSetExt};

use crate::{InstanceId, LifetimeState};

/// Direction of a single accounting update.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CountDelta {
    Increment,
    Decrement,
}

/// Live-instance counter for one tracked type within a group.
///
/// An entry records the fully-qualified name of the type, the configured maximum
/// number of simultaneously live instances, the current live count and the identity
/// tokens of the live instances. Entries are created on first registration of their
/// type and never removed, so historical types remain visible at a count of zero.
#[derive(Clone, Debug)]
pub struct Entry {
    name: &'static str,
    max_count: usize,
    count: usize,
    instance_ids: HashSet<InstanceId>,
}

impl Entry {
    pub(crate) fn new(name: &'static str, max_count: usize) -> Self {
        Self {
            name,
            max_count,
            count: 0,
            instance_ids: HashSet::new(),
        }
    }

    /// Replaces the configured maximum with the last-seen value.
    pub(crate) fn set_max_count(&mut self, max_count: usize) {
        self.max_count = max_count;
    }

    pub(crate) fn update(&mut self, instance_id: InstanceId, delta: CountDelta) {
        match delta {
            CountDelta::Increment => {
                self.count = self
                    .count
                    .checked_add(1)
                    .expect("live instance count overflows usize - this indicates an unrealistic scenario");
                self.instance_ids.insert(instance_id);
            }
            CountDelta::Decrement => {
                debug_assert!(
                    self.count > 0,
                    "decrementing an entry with no live instances - every registration must decrement exactly once"
                );
                self.count = self.count.saturating_sub(1);
                self.instance_ids.remove(&instance_id);
            }
        }
    }

    /// The fully-qualified name of the tracked type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The configured maximum number of simultaneously live instances.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// The number of currently live instances.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Identity tokens of the currently live instances, in unspecified order.
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.instance_ids.iter().copied()
    }

    /// Classifies the entry by comparing its live count against its maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::{LifetimeConfiguration, LifetimeState, LifetimeTracker};
    ///
    /// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
    ///
    /// let _first = tracker.track_with(LifetimeConfiguration::new(1), "demo::Widget");
    /// let _second = tracker.track_with(LifetimeConfiguration::new(1), "demo::Widget");
    ///
    /// let groups = tracker.groups_snapshot();
    /// let entry = groups
    ///     .values()
    ///     .flat_map(|group| group.entries())
    ///     .find(|entry| entry.name() == "demo::Widget")
    ///     .unwrap();
    ///
    /// assert_eq!(entry.lifetime_state(), LifetimeState::Leaky);
    /// ```
    #[must_use]
    pub fn lifetime_state(&self) -> LifetimeState {
        if self.count <= self.max_count {
            LifetimeState::Valid
        } else {
            LifetimeState::Leaky
        }
    }
}
