/// Policy deciding when the dashboard should be on screen.
///
/// The policy is consulted with the current issue state every time a new view
/// model is produced, so the dashboard can appear the moment a leak is
/// detected and disappear once the offending instances are released.
///
/// # Examples
///
/// ```
/// use lifetime_tracker_dashboard::Visibility;
///
/// let policy = Visibility::default();
/// assert_eq!(policy, Visibility::VisibleWithIssuesDetected);
///
/// assert!(policy.is_hidden(false));
/// assert!(!policy.is_hidden(true));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the policy space is fixed; every variant is a complete answer"
)]
pub enum Visibility {
    /// The dashboard is never shown.
    AlwaysHidden,

    /// The dashboard is always shown, even when nothing is wrong.
    AlwaysVisible,

    /// The dashboard is shown only while issues are detected.
    #[default]
    VisibleWithIssuesDetected,
}

impl Visibility {
    /// Whether the dashboard should be hidden given the current issue state.
    #[must_use]
    pub fn is_hidden(self, has_issues: bool) -> bool {
        match self {
            Self::AlwaysHidden => true,
            Self::AlwaysVisible => false,
            Self::VisibleWithIssuesDetected => !has_issues,
        }
    }
}
