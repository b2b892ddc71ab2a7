//! `pg_dump`-backed dump collaborator.

use core::time::Duration;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use backup_structs::BackupError;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::ports::DumpClient;

/// Invokes `pg_dump` as a child process with a hard deadline.
pub struct PgDump {
    program: String,
    deadline: Duration,
}

impl PgDump {
    #[must_use]
    pub fn new(deadline: Duration) -> Self {
        Self::with_program("pg_dump", deadline)
    }

    /// Uses `program` instead of the `pg_dump` found on PATH.
    #[must_use]
    pub fn with_program(program: impl Into<String>, deadline: Duration) -> Self {
        Self {
            program: program.into(),
            deadline,
        }
    }
}

#[async_trait]
impl DumpClient for PgDump {
    async fn dump(&self, database: &str, output_path: &Path) -> Result<(), BackupError> {
        debug!(database, output = %output_path.display(), "Running pg_dump");

        let child = Command::new(&self.program)
            .arg("--file")
            .arg(output_path)
            .arg(database)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            // wait_with_output drains stderr while the child runs; reading
            // the pipe only after exit stalls once the child fills it. It
            // also consumes the child, so the deadline branch has no handle
            // left to kill and dropping the future must do it.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BackupError::Dump(format!("failed to spawn {}: {e}", self.program)))?;

        let output = match timeout(self.deadline, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| BackupError::Dump(format!("{} did not run: {e}", self.program)))?,
            Err(_elapsed) => {
                return Err(BackupError::Timeout {
                    stage: "dump",
                    timeout_secs: self.deadline.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr);
            return Err(BackupError::Dump(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                message.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    use backup_structs::ErrorKind;

    use super::*;

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake_dump.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_noisy_failure_is_a_dump_error_not_a_timeout() {
        // A failing dump that writes far more stderr than a pipe buffers
        // must still finish within the deadline and keep its diagnostics.
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "head -c 262144 /dev/zero | tr '\\0' 'e' >&2\n\
             echo 'connection to server failed' >&2\n\
             exit 1",
        );

        let client = PgDump::with_program(script.to_string_lossy(), Duration::from_secs(5));
        let err = client
            .dump("hospital", &dir.path().join("out.sql"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Dump);
        assert!(
            err.to_string().contains("connection to server failed"),
            "diagnostics lost: {err}"
        );
    }

    #[tokio::test]
    async fn test_dump_past_deadline_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "sleep 5");

        let client = PgDump::with_program(script.to_string_lossy(), Duration::from_millis(200));
        let err = client
            .dump("hospital", &dir.path().join("out.sql"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_missing_program_is_a_dump_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = PgDump::with_program("/nonexistent/pg_dump", Duration::from_secs(5));

        let err = client
            .dump("hospital", &dir.path().join("out.sql"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Dump);
    }
}
