//! List command - shows the retention set at the remote target.

use core::time::Duration;

use anyhow::{Context, Result};
use backup_runner::retention;
use backup_runner::{ScpTransport, Transport};
use backup_structs::RemoteTarget;
use config::Config;

/// Runs the list command.
///
/// # Errors
///
/// Returns an error if required configuration is missing or the remote
/// listing fails.
pub async fn run(config: &Config) -> Result<()> {
    let database = config
        .database
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .context("database name is required (--database or PGVAULT_DATABASE)")?;

    let remote: RemoteTarget = config
        .remote
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .context("remote target is required (--remote or PGVAULT_REMOTE)")?
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let transport = ScpTransport::new(Duration::from_secs(config.timeout_secs));
    let names = transport
        .list(&remote)
        .await
        .with_context(|| format!("failed to list backups at {remote}"))?;

    let artifacts = retention::sorted_artifacts(&names, database);

    if artifacts.is_empty() {
        println!("no backups for {database} at {remote}");
        return Ok(());
    }

    for name in &artifacts {
        println!("{name}");
    }
    println!("{} backup(s) for {database} at {remote}", artifacts.len());

    Ok(())
}
