// Types tracked without an explicit group are aggregated under this reserved key.
// User-chosen group names that collide with it join the same bucket.
pub(crate) const NO_GROUP_KEY: &str = "lifetime_tracker.no_group";

// How the reserved bucket is labeled in summaries and reports.
pub(crate) const NO_GROUP_DISPLAY_NAME: &str = "no group";
