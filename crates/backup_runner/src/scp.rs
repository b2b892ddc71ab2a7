//! `scp`/`ssh`-backed transport collaborator.

use core::time::Duration;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use backup_structs::{BackupError, RemoteTarget};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::ports::Transport;

/// Ships artifacts with `scp` and manages the remote directory over `ssh`,
/// each invocation bounded by a hard deadline.
pub struct ScpTransport {
    deadline: Duration,
}

/// Output of a completed remote command.
struct CommandOutput {
    stdout: String,
}

impl ScpTransport {
    #[must_use]
    pub const fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Runs one transport command to completion within the deadline,
    /// killing it on expiry.
    async fn run(
        &self,
        stage: &'static str,
        program: &str,
        args: &[&str],
    ) -> Result<CommandOutput, BackupError> {
        debug!(program, ?args, "Running transport command");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // wait_with_output consumes the child, so the deadline branch
            // has no handle left to kill; dropping the future must do it.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BackupError::Transfer(format!("failed to spawn {program}: {e}")))?;

        let output = match timeout(self.deadline, child.wait_with_output()).await {
            Ok(result) => {
                result.map_err(|e| BackupError::Transfer(format!("{program} did not run: {e}")))?
            }
            Err(_elapsed) => {
                return Err(BackupError::Timeout {
                    stage,
                    timeout_secs: self.deadline.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr);
            return Err(BackupError::Transfer(format!(
                "{program} exited with {}: {}",
                output.status,
                message.trim()
            )));
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Quotes one argument for the remote side of an `ssh`/`scp` invocation.
///
/// The remote shell re-splits whatever arrives, so paths with spaces or
/// metacharacters must travel single-quoted, with embedded single quotes
/// spliced out as `'\''`.
fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}

#[async_trait]
impl Transport for ScpTransport {
    async fn copy(&self, local_path: &Path, remote: &RemoteTarget) -> Result<(), BackupError> {
        let local = local_path.to_string_lossy();
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| BackupError::Transfer(format!("not a file path: {local}")))?;
        let destination = format!(
            "{}:{}",
            remote.host,
            shell_quote(&remote.file_path(&file_name))
        );

        self.run("transfer", "scp", &["-q", local.as_ref(), destination.as_str()])
            .await?;
        Ok(())
    }

    async fn list(&self, remote: &RemoteTarget) -> Result<Vec<String>, BackupError> {
        let path = shell_quote(&remote.path);
        let output = self
            .run(
                "retention",
                "ssh",
                &[remote.host.as_str(), "ls", "-1", path.as_str()],
            )
            .await?;

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn remove(&self, remote: &RemoteTarget, file_name: &str) -> Result<(), BackupError> {
        let target = shell_quote(&remote.file_path(file_name));
        self.run(
            "retention",
            "ssh",
            &[remote.host.as_str(), "rm", "--", target.as_str()],
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote_wraps_plain_paths() {
        assert_eq!(shell_quote("/srv/backups"), "'/srv/backups'");
    }

    #[test]
    fn test_shell_quote_preserves_spaces_and_metacharacters() {
        assert_eq!(
            shell_quote("/srv/backup archive/$db"),
            "'/srv/backup archive/$db'"
        );
    }

    #[test]
    fn test_shell_quote_splices_embedded_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
