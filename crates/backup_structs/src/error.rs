//! Error taxonomy for a backup run.

use serde::Serialize;
use thiserror::Error;

/// Fatal error raised by one of the orchestrator stages.
///
/// Any of these aborts the remaining stages. Retention problems are not
/// represented here: a failed prune is logged as a warning and never turns
/// a successful backup into a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackupError {
    /// Required configuration is missing or malformed. Raised before any
    /// external collaborator is invoked.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The database export exited non-zero or produced no usable output.
    #[error("dump failed: {0}")]
    Dump(String),

    /// The local artifact failed the size/checksum check.
    #[error("verification failed: {0}")]
    Verification(String),

    /// The artifact could not be copied to the remote target. The local
    /// artifact is retained in the staging directory.
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// An external process ran past its deadline and was killed.
    #[error("{stage} timed out after {timeout_secs}s")]
    Timeout {
        stage: &'static str,
        timeout_secs: u64,
    },
}

impl BackupError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Dump(_) => ErrorKind::Dump,
            Self::Verification(_) => ErrorKind::Verification,
            Self::Transfer(_) => ErrorKind::Transfer,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}

/// Error classification exposed in the [`crate::BackupReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Dump,
    Verification,
    Transfer,
    Timeout,
}
