use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The name of a tracking group, used for display and keying purposes.
///
/// Typically group names are `&'static str` but for rare cases when the exact
/// set of groups is not known in advance, we also support owned strings via `Cow`.
pub type GroupName = Cow<'static, str>;

/// Identity token for one tracked registration.
///
/// Every registration receives a fresh token from a process-wide counter. Tokens are
/// never reused within a process, unlike memory addresses, so two registrations can
/// always be told apart even when an allocator hands out the same address twice.
///
/// Displayed as `#` followed by the numeric token value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstanceId(u64);

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

impl InstanceId {
    /// Allocates the next unused token.
    pub(crate) fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Differentiates tracked state on the within-bounds axis.
///
/// The classification is always derived by comparing the current live-instance count
/// against the configured maximum at the moment of asking. It is never stored, so it
/// cannot go stale.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "binary classification that will never gain variants"
)]
pub enum LifetimeState {
    /// The live-instance count is within the configured maximum.
    Valid,

    /// The live-instance count exceeds the configured maximum.
    Leaky,
}
