//! The process-wide lifetime accounting registry.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use foldhash::HashMapExt;
use parking_lot::{Mutex, ReentrantMutex};
use tracing::{debug, trace, warn};

use crate::entry::CountDelta;
use crate::{
    DropNotifier, EntriesGroup, Entry, GroupName, InstallError, InstanceId, LeakReport,
    LifetimeConfiguration, LifetimeGuard, LifetimeState, Trackable, TrackedGroups,
};

/// Observer invoked synchronously with a full snapshot after every tracked change.
pub type UpdateCallback = Box<dyn Fn(&TrackedGroups) + Send + Sync>;

/// Observer invoked synchronously when an increment leaves an entry over its
/// configured maximum.
pub type LeakCallback = Box<dyn Fn(&Entry, &EntriesGroup) + Send + Sync>;

static GLOBAL_INSTANCE: Mutex<Option<LifetimeTracker>> = Mutex::new(None);

/// One registration's resolved identity, captured for the life of its guard.
///
/// The decrement at guard drop replays the same configuration that the increment
/// used, so a registration always balances itself even if the type's configuration
/// changes in between.
#[derive(Clone, Debug)]
struct Registration {
    configuration: LifetimeConfiguration,
    group_key: GroupName,
    instance_name: &'static str,
    instance_id: InstanceId,
}

struct TrackerInner {
    // Re-entrant so that callbacks, which run inside the lock, can call back into
    // the tracker from the same thread without deadlocking.
    groups: ReentrantMutex<RefCell<TrackedGroups>>,
    on_update: UpdateCallback,
    on_leak_detected: Option<LeakCallback>,
}

impl TrackerInner {
    fn apply(&self, registration: &Registration, delta: CountDelta) {
        let state = self.groups.lock();

        trace!(
            instance = registration.instance_name,
            instance_id = %registration.instance_id,
            delta = ?delta,
            "applying lifetime update"
        );

        let (leak, snapshot) = {
            let mut groups = state.borrow_mut();

            let group = groups
                .entry(registration.group_key.clone())
                .or_insert_with(|| EntriesGroup::new(&registration.group_key));

            group.update_entry(
                &registration.configuration,
                registration.instance_name,
                registration.instance_id,
                delta,
            );

            // Leak detection runs on increments only; a drop can only move counts
            // back toward their bounds.
            let leak = if delta == CountDelta::Increment {
                let entry = group
                    .entry(registration.instance_name)
                    .expect("entry was created by the update just applied");

                (entry.lifetime_state() == LifetimeState::Leaky)
                    .then(|| (entry.clone(), group.clone()))
            } else {
                None
            };

            (leak, groups.clone())
        };

        if let Some((entry, group)) = leak {
            warn!(
                entry = entry.name(),
                count = entry.count(),
                max_count = entry.max_count(),
                group = group.display_name(),
                "configured lifetime bound exceeded"
            );

            if let Some(on_leak_detected) = &self.on_leak_detected {
                on_leak_detected(&entry, &group);
            }
        }

        (self.on_update)(&snapshot);

        // Callbacks complete before the lock releases, so observers never interleave.
        drop(state);
    }
}

/// Registry of live-instance counts for tracked types.
///
/// A tracker keeps one [`Entry`] per tracked type, aggregated into
/// [`EntriesGroup`]s, all behind a single re-entrant lock. Registering an instance
/// increments its type's count and returns a [`LifetimeGuard`]; dropping the guard
/// decrements it. After every change the tracker synchronously invokes its update
/// callback with a snapshot of all tracked state, and its optional leak callback
/// whenever an increment leaves an entry over its configured maximum.
///
/// `LifetimeTracker` is a cheaply cloneable handle; clones share the same state.
/// Trackers can be used standalone or installed as the process-wide instance that
/// [`Trackable::track_lifetime()`] uses.
///
/// This package is not meant for use in production, serving only as a development
/// tool.
///
/// # Examples
///
/// ```
/// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
///
/// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
///
/// let configuration = LifetimeConfiguration::new(1).with_group("documents");
///
/// let first = tracker.track_with(configuration.clone(), "demo::Document");
/// let second = tracker.track_with(configuration, "demo::Document");
///
/// // Two live instances against a bound of one: the report names the group.
/// assert!(!tracker.to_report().is_empty());
///
/// drop(second);
/// drop(first);
/// assert!(tracker.to_report().is_empty());
/// ```
#[derive(Clone)]
pub struct LifetimeTracker {
    inner: Arc<TrackerInner>,
}

impl LifetimeTracker {
    /// Starts building a tracker.
    #[must_use]
    pub fn builder() -> LifetimeTrackerBuilder {
        LifetimeTrackerBuilder::new()
    }

    /// Registers one instance of `T` and returns the guard that ends the
    /// registration when dropped.
    ///
    /// The instance is counted under `T`'s fully-qualified type name, in the group
    /// its configuration names (or the reserved bucket when it names none).
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker, Trackable};
    ///
    /// struct Connection;
    ///
    /// impl Trackable for Connection {
    ///     fn lifetime_configuration() -> LifetimeConfiguration {
    ///         LifetimeConfiguration::new(2).with_group("network")
    ///     }
    /// }
    ///
    /// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
    ///
    /// let _connection = Connection;
    /// let _guard = tracker.track::<Connection>();
    ///
    /// assert!(!tracker.is_empty());
    /// ```
    pub fn track<T: Trackable>(&self) -> LifetimeGuard {
        self.track_with(T::lifetime_configuration(), type_name::<T>())
    }

    /// Registers one instance under an explicit configuration and display name.
    ///
    /// This serves call sites that cannot implement [`Trackable`], such as tracking
    /// instances of foreign types, and tests.
    pub fn track_with(
        &self,
        configuration: LifetimeConfiguration,
        instance_name: &'static str,
    ) -> LifetimeGuard {
        let group_key = configuration.group_key();

        let registration = Registration {
            configuration,
            group_key,
            instance_name,
            instance_id: InstanceId::next(),
        };

        self.inner.apply(&registration, CountDelta::Increment);

        let instance_id = registration.instance_id;
        let inner = Arc::clone(&self.inner);
        let notifier =
            DropNotifier::new(move || inner.apply(&registration, CountDelta::Decrement));

        LifetimeGuard::new(instance_id, notifier)
    }

    /// Clones the full tracked state for pull-style consumers.
    ///
    /// Push-style consumers receive the same data through the update callback; the
    /// snapshot returned here is equally owned and detached from later changes.
    #[must_use]
    pub fn groups_snapshot(&self) -> TrackedGroups {
        let state = self.inner.groups.lock();
        state.borrow().clone()
    }

    /// Creates a report of the groups currently exceeding their bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
    ///
    /// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
    ///
    /// let _extra = tracker.track_with(LifetimeConfiguration::new(0), "demo::Singleton");
    ///
    /// let report = tracker.to_report();
    /// assert!(!report.is_empty());
    /// println!("{report}");
    /// ```
    #[must_use]
    pub fn to_report(&self) -> LeakReport {
        LeakReport::from_groups(&self.groups_snapshot())
    }

    /// Prints the leak report to stdout.
    ///
    /// This is a convenience method equivalent to `self.to_report().print_to_stdout()`.
    /// Prints nothing when no group currently exceeds its bounds.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        self.to_report().print_to_stdout();
    }

    /// Whether no tracked instance is currently alive.
    ///
    /// Groups and entries persist at a count of zero, so an emptied tracker still
    /// carries history for display purposes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let state = self.inner.groups.lock();
        let groups = state.borrow();
        groups.values().all(|group| group.count() == 0)
    }

    /// The globally installed tracker, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::LifetimeTracker;
    ///
    /// assert!(LifetimeTracker::instance().is_none());
    ///
    /// LifetimeTracker::builder().on_update(|_| {}).install();
    /// assert!(LifetimeTracker::instance().is_some());
    /// # LifetimeTracker::uninstall();
    /// ```
    #[must_use]
    pub fn instance() -> Option<Self> {
        GLOBAL_INSTANCE.lock().clone()
    }

    /// Removes the globally installed tracker, if any.
    ///
    /// Existing guards are unaffected: each holds its own handle to the tracker
    /// state and keeps decrementing it when dropped. Primarily useful in tests that
    /// need a clean slate.
    pub fn uninstall() {
        let previous = GLOBAL_INSTANCE.lock().take();

        if previous.is_some() {
            debug!("global lifetime tracker uninstalled");
        }
    }
}

impl fmt::Debug for LifetimeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeTracker").finish_non_exhaustive()
    }
}

impl fmt::Display for LifetimeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to LeakReport's Display implementation.
        write!(f, "{}", self.to_report())
    }
}

/// Builder for [`LifetimeTracker`] instances.
///
/// The update callback is required. Both callbacks run synchronously inside the
/// tracker lock, so they observe every change in order and may call back into the
/// tracker from the same thread; keep them fast.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
///
/// let leaks = Arc::new(AtomicUsize::new(0));
///
/// let tracker = {
///     let leaks = Arc::clone(&leaks);
///     LifetimeTracker::builder()
///         .on_update(|_| {})
///         .on_leak_detected(move |_entry, _group| {
///             leaks.fetch_add(1, Ordering::Relaxed);
///         })
///         .build()
/// };
///
/// let configuration = LifetimeConfiguration::new(1);
/// let _first = tracker.track_with(configuration.clone(), "demo::Parser");
/// let _second = tracker.track_with(configuration, "demo::Parser");
///
/// assert_eq!(leaks.load(Ordering::Relaxed), 1);
/// ```
pub struct LifetimeTrackerBuilder {
    on_update: Option<UpdateCallback>,
    on_leak_detected: Option<LeakCallback>,
}

impl LifetimeTrackerBuilder {
    fn new() -> Self {
        Self {
            on_update: None,
            on_leak_detected: None,
        }
    }

    /// Sets the update callback, invoked synchronously with a full snapshot after
    /// every tracked change. Required.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
    ///
    /// let updates = Arc::new(AtomicUsize::new(0));
    ///
    /// let tracker = {
    ///     let updates = Arc::clone(&updates);
    ///     LifetimeTracker::builder()
    ///         .on_update(move |groups| {
    ///             updates.fetch_add(1, Ordering::Relaxed);
    ///             assert!(!groups.is_empty());
    ///         })
    ///         .build()
    /// };
    ///
    /// let guard = tracker.track_with(LifetimeConfiguration::new(1), "demo::Job");
    /// drop(guard);
    ///
    /// // One update for the registration, one for the drop.
    /// assert_eq!(updates.load(Ordering::Relaxed), 2);
    /// ```
    #[must_use]
    pub fn on_update(
        mut self,
        callback: impl Fn(&TrackedGroups) + Send + Sync + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Sets the leak callback, invoked synchronously every time an increment leaves
    /// an entry over its configured maximum.
    #[must_use]
    pub fn on_leak_detected(
        mut self,
        callback: impl Fn(&Entry, &EntriesGroup) + Send + Sync + 'static,
    ) -> Self {
        self.on_leak_detected = Some(Box::new(callback));
        self
    }

    /// Creates the tracker.
    ///
    /// # Panics
    ///
    /// Panics if no update callback has been set.
    #[must_use]
    pub fn build(self) -> LifetimeTracker {
        let on_update = self
            .on_update
            .expect("building a LifetimeTracker requires an update callback - set one with on_update()");

        LifetimeTracker {
            inner: Arc::new(TrackerInner {
                groups: ReentrantMutex::new(RefCell::new(TrackedGroups::new())),
                on_update,
                on_leak_detected: self.on_leak_detected,
            }),
        }
    }

    /// Creates the tracker and installs it as the global instance used by
    /// [`Trackable::track_lifetime()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::LifetimeTracker;
    ///
    /// LifetimeTracker::builder().on_update(|_| {}).install();
    ///
    /// assert!(LifetimeTracker::instance().is_some());
    /// # LifetimeTracker::uninstall();
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if no update callback has been set or if a global tracker is already
    /// installed.
    pub fn install(self) {
        self.try_install()
            .expect("a global lifetime tracker is already installed");
    }

    /// Creates the tracker and installs it as the global instance, failing instead
    /// of panicking when one is already installed.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::AlreadyInstalled`] if a global tracker is already
    /// installed.
    ///
    /// # Panics
    ///
    /// Panics if no update callback has been set.
    pub fn try_install(self) -> Result<(), InstallError> {
        let tracker = self.build();

        let mut slot = GLOBAL_INSTANCE.lock();

        if slot.is_some() {
            return Err(InstallError::AlreadyInstalled);
        }

        *slot = Some(tracker);
        debug!("global lifetime tracker installed");
        Ok(())
    }
}

impl fmt::Debug for LifetimeTrackerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeTrackerBuilder")
            .field("on_update", &self.on_update.is_some())
            .field("on_leak_detected", &self.on_leak_detected.is_some())
            .finish()
    }
}
