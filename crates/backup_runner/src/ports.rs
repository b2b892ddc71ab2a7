//! Trait seams for the external collaborators.

use std::path::Path;

use async_trait::async_trait;
use backup_structs::{BackupError, RemoteTarget};

/// Database export collaborator.
///
/// Credentials are the collaborator's business (libpq environment,
/// `.pgpass`), never this tool's.
#[async_trait]
pub trait DumpClient: Send + Sync {
    /// Exports `database` to `output_path`.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Dump`] if the export exits non-zero and
    /// [`BackupError::Timeout`] if it runs past its deadline. A partial
    /// output file may be left behind; the orchestrator removes it.
    async fn dump(&self, database: &str, output_path: &Path) -> Result<(), BackupError>;
}

/// Transport collaborator shipping artifacts to the remote target.
///
/// Authentication is out-of-band (pre-shared keys).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Copies a local file to the remote directory.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Transfer`] on a non-zero exit and
    /// [`BackupError::Timeout`] past the deadline.
    async fn copy(&self, local_path: &Path, remote: &RemoteTarget) -> Result<(), BackupError>;

    /// Lists file names in the remote directory.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Transfer`] if the listing command fails.
    async fn list(&self, remote: &RemoteTarget) -> Result<Vec<String>, BackupError>;

    /// Removes a file from the remote directory.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Transfer`] if the removal command fails.
    async fn remove(&self, remote: &RemoteTarget, file_name: &str) -> Result<(), BackupError>;
}
