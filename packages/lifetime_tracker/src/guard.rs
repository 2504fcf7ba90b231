//! Registration tokens for tracked instances.

use std::fmt;

use crate::{DropNotifier, InstanceId};

/// Registration token for one tracked instance.
///
/// Returned by [`LifetimeTracker::track()`](crate::LifetimeTracker::track) and
/// [`Trackable::track_lifetime()`](crate::Trackable::track_lifetime). The instance it
/// represents is counted as alive until the guard is dropped, so keep the guard in a
/// field of the tracked type (or otherwise tied to the instance's lifetime).
///
/// Guards may be dropped on any thread. A guard that is leaked keeps its instance
/// counted forever, exactly like an object that never becomes unreachable.
///
/// Types that embed a guard are `Send` but not `Sync`; shared references to a guard
/// have no use, so nothing is lost.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
///
/// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
///
/// let guard = tracker.track_with(LifetimeConfiguration::new(1), "demo::Connection");
/// assert!(!tracker.is_empty());
///
/// drop(guard);
/// assert!(tracker.is_empty());
/// ```
#[must_use = "an instance is counted as alive until its guard is dropped"]
pub struct LifetimeGuard {
    instance_id: InstanceId,
    _notifier: DropNotifier,
}

impl LifetimeGuard {
    pub(crate) fn new(instance_id: InstanceId, notifier: DropNotifier) -> Self {
        Self {
            instance_id,
            _notifier: notifier,
        }
    }

    /// The identity token of the registration this guard represents.
    ///
    /// The same token appears in the tracked entry's identity set while the guard is
    /// alive.
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }
}

impl fmt::Debug for LifetimeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeGuard")
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{EntriesGroup, LifetimeConfiguration, LifetimeTracker};

    #[test]
    fn guard_reports_its_registration_token() {
        let tracker = LifetimeTracker::builder().on_update(|_| {}).build();

        let guard = tracker.track_with(LifetimeConfiguration::new(1), "tests::Item");

        let groups = tracker.groups_snapshot();
        let entry = groups
            .values()
            .flat_map(EntriesGroup::entries)
            .find(|entry| entry.name() == "tests::Item")
            .expect("entry exists while the guard is alive");

        assert!(entry.instance_ids().any(|id| id == guard.instance_id()));
    }

    static_assertions::assert_impl_all!(LifetimeGuard: Send);
    static_assertions::assert_not_impl_any!(LifetimeGuard: Sync);
}
