use lifetime_tracker::LifetimeState;

use crate::DashboardViewModel;

/// How a dismissed dashboard decides whether to come back.
///
/// When the user hides the dashboard, the embedder remembers the view model
/// that was on screen together with the chosen option. Each subsequent frame
/// is then checked with [`should_show_again`][Self::should_show_again] to see
/// whether the situation has changed enough to justify re-surfacing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the dismissal choices form a closed set presented to the user"
)]
pub enum HideOption {
    /// Re-show once the total leak count grows past the dismissed one.
    UntilMoreIssues,

    /// Re-show once a group leaks that was fine when dismissed.
    UntilNewIssueType,

    /// Stay hidden for the rest of the process lifetime.
    Always,

    /// Plain dismissal with no re-show condition.
    None,
}

impl HideOption {
    /// Whether `current` justifies re-surfacing a dashboard dismissed at `hidden`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifetime_tracker::{LifetimeConfiguration, LifetimeTracker};
    /// use lifetime_tracker_dashboard::{DashboardPresenter, HideOption};
    ///
    /// let tracker = LifetimeTracker::builder().on_update(|_| {}).build();
    /// let presenter = DashboardPresenter::default();
    /// let configuration = LifetimeConfiguration::new(0).with_group("caches");
    ///
    /// let _first = tracker.track_with(configuration.clone(), "app::Cache");
    /// let hidden = presenter.render(&tracker.groups_snapshot());
    ///
    /// // One more leaked instance since dismissal.
    /// let _second = tracker.track_with(configuration, "app::Cache");
    /// let current = presenter.render(&tracker.groups_snapshot());
    ///
    /// assert!(HideOption::UntilMoreIssues.should_show_again(&hidden, &current));
    /// assert!(!HideOption::Always.should_show_again(&hidden, &current));
    /// ```
    #[must_use]
    pub fn should_show_again(
        self,
        hidden: &DashboardViewModel,
        current: &DashboardViewModel,
    ) -> bool {
        match self {
            Self::UntilMoreIssues => current.leaks_count() > hidden.leaks_count(),
            Self::UntilNewIssueType => current
                .sections()
                .iter()
                .filter(|section| section.lifetime_state() == LifetimeState::Leaky)
                .any(|section| {
                    hidden
                        .sections()
                        .iter()
                        .find(|candidate| candidate.name() == section.name())
                        .is_none_or(|candidate| {
                            candidate.lifetime_state() == LifetimeState::Valid
                        })
                }),
            Self::Always | Self::None => false,
        }
    }
}
