//! Per-invocation backup job description.

use chrono::{DateTime, Utc};

use crate::RemoteTarget;
use crate::naming;

/// Everything one orchestrator run needs to know. Created once per
/// invocation and immutable afterwards.
///
/// The creation time is captured exactly once, here, and reused for both
/// the artifact file name and the artifact record. Recomputing "now"
/// mid-run would let the two drift apart.
#[derive(Debug, Clone)]
pub struct BackupJob {
    /// Database to dump.
    pub database: String,
    /// Destination for the artifact.
    pub remote: RemoteTarget,
    /// How many historical artifacts to keep at the destination.
    pub retention_count: u32,
    /// When this job was created (UTC).
    pub created_at: DateTime<Utc>,
    /// Artifact file name derived from `database` and `created_at`.
    pub file_name: String,
}

impl BackupJob {
    /// Creates a job, capturing the current time and fixing the artifact
    /// file name.
    #[must_use]
    pub fn new(database: String, remote: RemoteTarget, retention_count: u32) -> Self {
        let created_at = Utc::now();
        let file_name = naming::artifact_file_name(&database, created_at);

        Self {
            database,
            remote,
            retention_count,
            created_at,
            file_name,
        }
    }
}
