//! The staged backup pipeline: name, dump, verify, transfer, retain.

use backup_structs::{Artifact, BackupError, BackupJob, BackupReport, RemoteTarget};
use config::Config;
use tracing::{error, info, warn};

use crate::ports::{DumpClient, Transport};
use crate::{retention, verify};

/// Drives one backup run front to back.
///
/// Strictly sequential; a fatal error in any stage aborts the remainder.
/// Concurrent invocations against the same staging directory are excluded
/// by the external scheduler, not here.
pub struct Orchestrator<D, T> {
    config: Config,
    dump: D,
    transport: T,
}

impl<D: DumpClient, T: Transport> Orchestrator<D, T> {
    #[must_use]
    pub const fn new(config: Config, dump: D, transport: T) -> Self {
        Self {
            config,
            dump,
            transport,
        }
    }

    /// Runs the pipeline and reports the outcome. Never panics on stage
    /// failure; the report carries the error and its classification.
    pub async fn run(&self) -> BackupReport {
        let job = match self.validate() {
            Ok(job) => job,
            Err(e) => {
                error!(error = %e, "Configuration rejected");
                return BackupReport::failure(&e, None);
            }
        };

        info!(
            database = %job.database,
            artifact = %job.file_name,
            remote = %job.remote,
            "Starting backup"
        );

        match self.execute(&job).await {
            Ok(artifact) => {
                info!(
                    artifact = %job.file_name,
                    size_bytes = artifact.size_bytes,
                    checksum = %artifact.checksum,
                    "Backup complete"
                );
                BackupReport::success(&artifact)
            }
            Err(e) => {
                error!(artifact = %job.file_name, error = %e, "Backup failed");
                BackupReport::failure(&e, Some(job.file_name.clone()))
            }
        }
    }

    /// Validates the configuration into an immutable job. Runs before any
    /// external collaborator is invoked.
    fn validate(&self) -> Result<BackupJob, BackupError> {
        let database = match self.config.database.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => {
                return Err(BackupError::Configuration(
                    "database name is required (--database or PGVAULT_DATABASE)".to_string(),
                ));
            }
        };

        let remote_raw = match self.config.remote.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                return Err(BackupError::Configuration(
                    "remote target is required (--remote or PGVAULT_REMOTE)".to_string(),
                ));
            }
        };

        let remote: RemoteTarget = remote_raw
            .parse()
            .map_err(|e| BackupError::Configuration(format!("{e}")))?;

        Ok(BackupJob::new(database, remote, self.config.retention_count))
    }

    async fn execute(&self, job: &BackupJob) -> Result<Artifact, BackupError> {
        std::fs::create_dir_all(&self.config.backup_dir).map_err(|e| {
            BackupError::Configuration(format!(
                "cannot create backup directory {}: {e}",
                self.config.backup_dir.display()
            ))
        })?;

        let local_path = self.config.backup_dir.join(&job.file_name);

        // Dump. A failed export may leave a partial file; remove it so the
        // staging directory holds nothing after a dump failure.
        if let Err(e) = self.dump.dump(&job.database, &local_path).await {
            std::fs::remove_file(&local_path).ok();
            return Err(e);
        }

        match std::fs::metadata(&local_path) {
            Ok(meta) if meta.len() > 0 => {}
            Ok(_) => {
                std::fs::remove_file(&local_path).ok();
                return Err(BackupError::Dump(format!(
                    "pg_dump produced a zero-byte file for {}",
                    job.database
                )));
            }
            Err(_) => {
                return Err(BackupError::Dump(format!(
                    "pg_dump produced no output file for {}",
                    job.database
                )));
            }
        }

        // Verify before transfer; a corrupt artifact never leaves the host.
        let artifact = verify::verify_artifact(&local_path, job.created_at)?;

        // Transfer. On failure the artifact stays in the staging directory
        // so no data is lost; retries belong to the external scheduler.
        self.transport.copy(&local_path, &job.remote).await?;

        // The remote copy is the one that counts now.
        if let Err(e) = std::fs::remove_file(&local_path) {
            warn!(
                artifact = %job.file_name,
                error = %e,
                "Transferred artifact could not be removed from staging"
            );
        }

        match retention::prune(
            &self.transport,
            &job.remote,
            &job.database,
            job.retention_count,
        )
        .await
        {
            Ok(0) => {}
            Ok(deleted) => info!(deleted, "Retention pruned expired artifacts"),
            Err(e) => warn!(error = %e, "Retention prune failed; backup is still good"),
        }

        Ok(artifact)
    }
}
