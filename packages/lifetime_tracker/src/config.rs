//! Declarations of expected lifetime bounds for tracked types.

use std::borrow::Cow;

use crate::constants::NO_GROUP_KEY;
use crate::{GroupName, LifetimeGuard, LifetimeTracker};

/// Declares how many live instances of a type are expected and how they aggregate.
///
/// A configuration states the maximum number of instances that may legitimately be
/// alive at once, an optional group that the type's counts aggregate into, and an
/// optional explicit maximum for that whole group.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::LifetimeConfiguration;
///
/// // At most one player view controller should ever be alive.
/// let configuration = LifetimeConfiguration::new(1).with_group("view_controllers");
///
/// assert_eq!(configuration.max_count(), 1);
/// assert_eq!(configuration.group_name(), Some("view_controllers"));
/// ```
///
/// A group-wide maximum replaces the default (the sum of member maximums) and stays
/// in force for the life of the group:
///
/// ```
/// use lifetime_tracker::LifetimeConfiguration;
///
/// let configuration = LifetimeConfiguration::new(3)
///     .with_group("caches")
///     .with_group_max_count(5);
///
/// assert_eq!(configuration.group_max_count(), Some(5));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifetimeConfiguration {
    max_count: usize,
    group_name: Option<GroupName>,
    group_max_count: Option<usize>,
}

impl LifetimeConfiguration {
    /// Creates a configuration for a type with no group membership.
    ///
    /// `max_count` is the number of instances that may legitimately be alive at the
    /// same time. Zero is valid and means the first live instance is already one too
    /// many.
    #[must_use]
    pub fn new(max_count: usize) -> Self {
        Self {
            max_count,
            group_name: None,
            group_max_count: None,
        }
    }

    /// Assigns the group that this type's counts aggregate into.
    #[must_use]
    pub fn with_group(mut self, name: impl Into<GroupName>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Sets an explicit maximum for the whole group.
    ///
    /// Without this, a group's maximum is the sum of the configured maximums of its
    /// member types. The explicit maximum replaces that default and latches: once any
    /// member supplies one, later per-type maximum changes no longer move the group
    /// maximum.
    ///
    /// Meaningful together with [`with_group()`](Self::with_group); without a group,
    /// the override applies to the bucket that collects ungrouped types.
    #[must_use]
    pub fn with_group_max_count(mut self, max_count: usize) -> Self {
        self.group_max_count = Some(max_count);
        self
    }

    /// The number of instances of the type that may legitimately be alive at once.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// The group this type's counts aggregate into, if any.
    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// The explicit group-wide maximum, if any.
    #[must_use]
    pub fn group_max_count(&self) -> Option<usize> {
        self.group_max_count
    }

    /// The key under which this configuration's counts aggregate, using the reserved
    /// bucket key when no group is assigned.
    pub(crate) fn group_key(&self) -> GroupName {
        self.group_name
            .clone()
            .unwrap_or(Cow::Borrowed(NO_GROUP_KEY))
    }
}

/// Types that opt in to lifetime tracking.
///
/// Implement this for any type whose live-instance count you want watched, then call
/// [`track_lifetime()`](Self::track_lifetime) from the type's constructor and keep the
/// returned guard alive for the life of the instance (typically in a field). The
/// instance stays counted until the guard is dropped.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::{
///     LifetimeConfiguration, LifetimeGuard, LifetimeTracker, Trackable,
/// };
///
/// struct AudioPlayer {
///     _lifetime: Option<LifetimeGuard>,
/// }
///
/// impl Trackable for AudioPlayer {
///     fn lifetime_configuration() -> LifetimeConfiguration {
///         LifetimeConfiguration::new(1).with_group("audio")
///     }
/// }
///
/// impl AudioPlayer {
///     fn new() -> Self {
///         Self {
///             _lifetime: AudioPlayer::track_lifetime(),
///         }
///     }
/// }
///
/// LifetimeTracker::builder().on_update(|_| {}).install();
///
/// let player = AudioPlayer::new();
/// assert!(LifetimeTracker::instance().is_some_and(|tracker| !tracker.is_empty()));
///
/// drop(player);
/// # LifetimeTracker::uninstall();
/// ```
pub trait Trackable {
    /// The expected lifetime bounds for this type.
    fn lifetime_configuration() -> LifetimeConfiguration;

    /// Registers one instance of this type with the globally installed tracker.
    ///
    /// Returns `None` and does nothing else when no tracker is installed, so tracked
    /// types work unchanged in processes that never enable tracking.
    #[must_use = "an instance is counted as alive until its guard is dropped"]
    fn track_lifetime() -> Option<LifetimeGuard>
    where
        Self: Sized,
    {
        LifetimeTracker::instance().map(|tracker| tracker.track::<Self>())
    }
}
