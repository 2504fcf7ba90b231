//! Live-instance accounting for registered types.
//!
//! This package answers, continuously and in-process, the question "how many
//! instances of each registered type are alive right now, and is that more than
//! there should be?" Types declare their expected maximum number of simultaneously
//! live instances; every registration is counted up at construction and counted
//! down the moment its guard is dropped. Counts aggregate into named groups, each
//! classified [`Valid`](LifetimeState::Valid) or [`Leaky`](LifetimeState::Leaky) by
//! comparing live count against the configured maximum.
//!
//! The core functionality includes:
//! - [`LifetimeConfiguration`] - Declares a type's expected lifetime bounds
//! - [`Trackable`] - Opt-in trait for types whose instances should be counted
//! - [`LifetimeTracker`] - The registry; hands out guards and runs the callbacks
//! - [`LifetimeGuard`] - Registration token; dropping it ends the tracked lifetime
//! - [`DropNotifier`] - Fires a callback exactly once at the end of a lifetime
//! - [`LeakReport`] - Printable snapshot of the groups currently over their bounds
//!
//! This package is not meant for use in production, serving only as a development
//! tool.
//!
//! # Simple usage
//!
//! Implement [`Trackable`], install a global tracker, and keep the guard returned
//! by [`Trackable::track_lifetime()`] in a field:
//!
//! ```
//! use lifetime_tracker::{
//!     LifetimeConfiguration, LifetimeGuard, LifetimeTracker, Trackable,
//! };
//!
//! struct DetailView {
//!     _lifetime: Option<LifetimeGuard>,
//! }
//!
//! impl Trackable for DetailView {
//!     fn lifetime_configuration() -> LifetimeConfiguration {
//!         LifetimeConfiguration::new(1).with_group("views")
//!     }
//! }
//!
//! impl DetailView {
//!     fn new() -> Self {
//!         Self {
//!             _lifetime: DetailView::track_lifetime(),
//!         }
//!     }
//! }
//!
//! LifetimeTracker::builder()
//!     .on_update(|groups| {
//!         // Runs after every change with a snapshot of all tracked state,
//!         // typically forwarded to a dashboard.
//!         let _live: usize = groups.values().map(|group| group.count()).sum();
//!     })
//!     .install();
//!
//! let view = DetailView::new();
//! drop(view);
//! # LifetimeTracker::uninstall();
//! ```
//!
//! # Standalone trackers
//!
//! A tracker does not have to be installed globally. Tests and embedders that want
//! isolation can build local instances and register through
//! [`LifetimeTracker::track()`] or [`LifetimeTracker::track_with()`]:
//!
//! ```
//! use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
//!
//! let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
//!
//! let configuration = LifetimeConfiguration::new(1).with_group("sessions");
//! let _first = tracker.track_with(configuration.clone(), "app::Session");
//! let _second = tracker.track_with(configuration, "app::Session");
//!
//! // Two live instances against a bound of one.
//! tracker.print_to_stdout();
//! ```
//!
//! # Groups
//!
//! Types that name the same group aggregate into one [`EntriesGroup`]. The group's
//! maximum is the sum of its members' maximums unless a member supplies an explicit
//! group-wide maximum, which replaces the sum and latches. Types that name no group
//! land in a reserved bucket that behaves like any other group but has no name.
//!
//! # Thread safety
//!
//! All tracked state sits behind one re-entrant lock. Guards may be dropped on any
//! thread. Callbacks run synchronously inside the lock, so they observe every
//! change, in order, without tearing; they may call back into the tracker from the
//! same thread.

mod config;
mod constants;
mod dealloc;
mod entry;
mod error;
mod group;
mod guard;
mod primitive_types;
mod report;
mod tracker;

pub use config::*;
pub use dealloc::*;
pub use entry::Entry;
pub use error::*;
pub use group::*;
pub use guard::*;
pub use primitive_types::*;
pub use report::*;
pub use tracker::*;
