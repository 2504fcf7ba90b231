//! Dashboard building blocks for [`lifetime_tracker`].
//!
//! The tracker reports its state as snapshots; this crate turns each snapshot
//! into a deterministic, owned [`DashboardViewModel`] that a UI layer can draw
//! without touching the tracker again:
//!
//! - [`DashboardPresenter`] renders snapshots into view models and applies a
//!   [`Visibility`] policy.
//! - [`GroupModel`] and [`EntryModel`] carry the per-section display data,
//!   already filtered and ordered.
//! - [`HideOption`] decides when a dashboard dismissed by the user should
//!   come back.
//!
//! Rendering itself is out of scope. The view model is plain data, so the
//! update callback can ship it to whatever thread owns the screen.
//!
//! # Simple usage
//!
//! ```
//! use std::sync::mpsc;
//!
//! use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
//! use lifetime_tracker_dashboard::{DashboardPresenter, Visibility};
//!
//! let (sender, receiver) = mpsc::channel();
//! let presenter = DashboardPresenter::new(Visibility::AlwaysVisible);
//!
//! let tracker = LifetimeTracker::builder()
//!     .on_update(move |groups| {
//!         // Ship an owned frame to the rendering side.
//!         sender
//!             .send(presenter.render(groups))
//!             .expect("the rendering side outlives the tracker");
//!     })
//!     .build();
//!
//! let _view = tracker.track_with(
//!     LifetimeConfiguration::new(1).with_group("views"),
//!     "app::DetailView",
//! );
//!
//! let frame = receiver.recv().expect("tracking produced a frame");
//! assert_eq!(frame.sections().len(), 1);
//! assert_eq!(frame.summary(), "No issues detected");
//! assert!(!presenter.is_hidden(&frame));
//! ```
//!
//! # Determinism
//!
//! Two identical snapshots always render to equal view models: sections are
//! ordered most over budget first, entries within a section by live count,
//! and all ties break on names. This keeps the dashboard stable from frame
//! to frame even though the underlying snapshot is an unordered map.

mod hide_option;
mod model;
mod presenter;
mod visibility;

pub use hide_option::*;
pub use model::*;
pub use presenter::*;
pub use visibility::*;
