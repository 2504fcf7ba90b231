//! Aggregation of per-type counts into named groups.

use foldhash::{HashMap, HashMapExt};

use crate::constants::{NO_GROUP_DISPLAY_NAME, NO_GROUP_KEY};
use crate::entry::CountDelta;
use crate::{Entry, GroupName, InstanceId, LifetimeConfiguration, LifetimeState};

/// All tracked state, keyed by group.
///
/// Types tracked without a group aggregate under a reserved bucket that participates
/// in this map like any other group. Groups are created on first use and never
/// removed.
pub type TrackedGroups = HashMap<GroupName, EntriesGroup>;

/// Named aggregate of [`Entry`] counters sharing a group-wide maximum.
///
/// A group's maximum defaults to the sum of the configured maximums of its member
/// types. A configuration that supplies an explicit group maximum replaces that
/// default and latches: from then on, per-type maximum changes no longer move the
/// group maximum.
#[derive(Clone, Debug)]
pub struct EntriesGroup {
    name: Option<GroupName>,
    max_count: usize,
    count: usize,
    entries: HashMap<&'static str, Entry>,
    used_max_count_override: bool,
}

impl EntriesGroup {
    /// Creates an empty group for the given map key.
    ///
    /// The reserved bucket key yields a group without a name.
    pub(crate) fn new(key: &GroupName) -> Self {
        let name = if *key == NO_GROUP_KEY {
            None
        } else {
            Some(key.clone())
        };

        Self {
            name,
            max_count: 0,
            count: 0,
            entries: HashMap::new(),
            used_max_count_override: false,
        }
    }

    /// Applies one registration update to the entry for `instance_name` and to the
    /// group's own count and maximum.
    pub(crate) fn update_entry(
        &mut self,
        configuration: &LifetimeConfiguration,
        instance_name: &'static str,
        instance_id: InstanceId,
        delta: CountDelta,
    ) {
        let existed_before = self.entries.contains_key(instance_name);

        let entry = self
            .entries
            .entry(instance_name)
            .or_insert_with(|| Entry::new(instance_name, configuration.max_count()));

        let previous_max = entry.max_count();
        let new_max = configuration.max_count();

        entry.set_max_count(new_max);
        entry.update(instance_id, delta);

        match delta {
            CountDelta::Increment => {
                self.count = self
                    .count
                    .checked_add(1)
                    .expect("live instance count overflows usize - this indicates an unrealistic scenario");
            }
            CountDelta::Decrement => {
                debug_assert!(
                    self.count > 0,
                    "decrementing a group with no live instances - every registration must decrement exactly once"
                );
                self.count = self.count.saturating_sub(1);
            }
        }

        if let Some(group_max) = configuration.group_max_count() {
            self.used_max_count_override = true;
            self.max_count = group_max;
        } else if !self.used_max_count_override && !existed_before {
            // A new member type contributes its own maximum to the summed default.
            self.max_count = self
                .max_count
                .checked_add(new_max)
                .expect("group maximum overflows usize - this indicates an unrealistic scenario");
        } else if !self.used_max_count_override && new_max != previous_max {
            // The member's bound moved; follow it in the summed default.
            if new_max > previous_max {
                let grow = new_max
                    .checked_sub(previous_max)
                    .expect("guarded by if condition");
                self.max_count = self
                    .max_count
                    .checked_add(grow)
                    .expect("group maximum overflows usize - this indicates an unrealistic scenario");
            } else {
                let shrink = previous_max
                    .checked_sub(new_max)
                    .expect("guarded by if condition");
                self.max_count = self.max_count.saturating_sub(shrink);
            }
        }
    }

    /// The group's name, or `None` for the reserved bucket that collects ungrouped
    /// types.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The group's name as shown in summaries and reports.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NO_GROUP_DISPLAY_NAME)
    }

    /// The group-wide maximum number of simultaneously live instances.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// The number of currently live instances across all member types.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The counter for one member type, if that type has ever been tracked here.
    #[must_use]
    pub fn entry(&self, instance_name: &str) -> Option<&Entry> {
        self.entries.get(instance_name)
    }

    /// All member type counters, in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Classifies the group.
    ///
    /// A group is [`Leaky`](LifetimeState::Leaky) when its own count exceeds its
    /// maximum, or when any member entry is leaky (a member can exceed its per-type
    /// bound while the group total stays within the group bound).
    #[must_use]
    pub fn lifetime_state(&self) -> LifetimeState {
        if self.count > self.max_count {
            return LifetimeState::Leaky;
        }

        if self
            .entries
            .values()
            .any(|entry| entry.lifetime_state() == LifetimeState::Leaky)
        {
            LifetimeState::Leaky
        } else {
            LifetimeState::Valid
        }
    }
}
