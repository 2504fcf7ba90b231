use thiserror::Error;

/// Errors that can occur when installing the global lifetime tracker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// A global tracker is already installed; there can be at most one per process.
    #[error("a global lifetime tracker is already installed")]
    AlreadyInstalled,
}
