//! Configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::Context;

/// Default number of historical artifacts kept at the remote target.
pub const DEFAULT_RETENTION_COUNT: u32 = 7;

/// Default deadline for the dump and transfer stages, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default local staging directory.
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Application configuration, loaded from the environment and overridden
/// by CLI flags. Passed explicitly into the orchestrator; there is no
/// global instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database to dump. Required; validated by the orchestrator.
    pub database: Option<String>,

    /// Local staging directory for artifacts.
    pub backup_dir: PathBuf,

    /// Remote target in `host:path` form. Required; validated by the
    /// orchestrator.
    pub remote: Option<String>,

    /// How many historical artifacts to keep at the remote target.
    pub retention_count: u32,

    /// Deadline for each external-process stage, in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PGVAULT_DATABASE`: database to dump
    /// - `PGVAULT_BACKUP_DIR`: local staging directory (default: `backups`)
    /// - `PGVAULT_REMOTE`: remote target, `host:path`
    /// - `PGVAULT_RETAIN`: artifacts to keep remotely (default: 7)
    /// - `PGVAULT_TIMEOUT_SECS`: per-stage deadline in seconds (default: 300)
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not parseable.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        let database = std::env::var("PGVAULT_DATABASE").ok();
        let remote = std::env::var("PGVAULT_REMOTE").ok();

        let backup_dir = std::env::var("PGVAULT_BACKUP_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_BACKUP_DIR), PathBuf::from);

        let retention_count = match std::env::var("PGVAULT_RETAIN") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("PGVAULT_RETAIN must be a non-negative integer")?,
            Err(_) => DEFAULT_RETENTION_COUNT,
        };

        let timeout_secs = match std::env::var("PGVAULT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("PGVAULT_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            database,
            backup_dir,
            remote,
            retention_count,
            timeout_secs,
        })
    }
}
