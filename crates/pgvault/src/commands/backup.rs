//! Backup command - runs one dump/verify/transfer/rotate cycle.

use core::time::Duration;

use anyhow::Result;
use backup_runner::{Orchestrator, PgDump, ScpTransport};
use backup_structs::BackupStatus;
use config::Config;

/// Runs the backup command.
///
/// Prints the report on stdout (one status line, or JSON with `--json`);
/// the process exits non-zero exactly when the run failed.
///
/// # Errors
///
/// Returns an error carrying the failed stage's message.
pub async fn run(config: Config, json: bool) -> Result<()> {
    let deadline = Duration::from_secs(config.timeout_secs);
    let orchestrator =
        Orchestrator::new(config, PgDump::new(deadline), ScpTransport::new(deadline));

    let report = orchestrator.run().await;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.status_line());
    }

    if report.status == BackupStatus::Failure {
        anyhow::bail!(
            "{}",
            report.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    Ok(())
}
