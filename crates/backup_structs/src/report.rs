//! Result record of one backup run.

use serde::Serialize;

use crate::{Artifact, BackupError, ErrorKind};

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupStatus {
    Success,
    Failure,
}

/// Summary returned by the orchestrator. Fatal errors end up here; a
/// failed retention prune does not (it is logged only).
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub status: BackupStatus,
    /// Name of the produced artifact, when the run got far enough to name
    /// one.
    pub artifact_name: Option<String>,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl BackupReport {
    /// Report for a run that transferred its artifact.
    #[must_use]
    pub fn success(artifact: &Artifact) -> Self {
        Self {
            status: BackupStatus::Success,
            artifact_name: Some(artifact.file_name()),
            size_bytes: artifact.size_bytes,
            error: None,
            error_kind: None,
        }
    }

    /// Report for a run aborted by a fatal error.
    #[must_use]
    pub fn failure(error: &BackupError, artifact_name: Option<String>) -> Self {
        Self {
            status: BackupStatus::Failure,
            artifact_name,
            size_bytes: 0,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    /// Human-readable one-liner for stdout.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.status {
            BackupStatus::Success => format!(
                "backup succeeded: {} ({} bytes)",
                self.artifact_name.as_deref().unwrap_or("<unnamed>"),
                self.size_bytes
            ),
            BackupStatus::Failure => format!(
                "backup failed: {}",
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
