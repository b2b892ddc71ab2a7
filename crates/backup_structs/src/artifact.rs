//! Local dump artifacts.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A verified database dump sitting in the staging directory.
///
/// Owned exclusively by the orchestrator until transfer completes; deleted
/// locally only after the transport reported success.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    /// Location in the staging directory.
    pub local_path: PathBuf,
    /// File size. Always greater than zero for a verified artifact.
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the file contents.
    pub checksum: String,
    /// Creation time of the job that produced this artifact.
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    /// Returns the bare file name of the artifact.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
