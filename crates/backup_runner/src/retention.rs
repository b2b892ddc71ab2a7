//! Remote retention: keep the newest N artifacts, prune the rest.

use backup_structs::{BackupError, RemoteTarget};
use backup_structs::naming::{ArtifactStamp, parse_artifact_name};
use tracing::{debug, info};

use crate::ports::Transport;

/// Artifact names for `database` found in `names`, newest first.
///
/// Names that do not parse as artifacts of this database are ignored, so
/// foreign files at the destination are never touched.
#[must_use]
pub fn sorted_artifacts(names: &[String], database: &str) -> Vec<String> {
    let mut stamped: Vec<(ArtifactStamp, &String)> = names
        .iter()
        .filter_map(|name| parse_artifact_name(database, name).map(|stamp| (stamp, name)))
        .collect();

    stamped.sort_by(|a, b| b.0.cmp(&a.0));
    stamped.into_iter().map(|(_, name)| name.clone()).collect()
}

/// Artifact names that fall outside the newest `retention_count`.
#[must_use]
pub fn select_expired(names: &[String], database: &str, retention_count: u32) -> Vec<String> {
    sorted_artifacts(names, database)
        .into_iter()
        .skip(retention_count as usize)
        .collect()
}

/// Applies the retention policy at the remote target.
///
/// Returns the number of artifacts deleted. Callers treat any error as a
/// warning: a failed prune must never be reported as a failed backup.
///
/// # Errors
///
/// Returns the transport's error if listing or removal fails.
pub async fn prune<T: Transport>(
    transport: &T,
    remote: &RemoteTarget,
    database: &str,
    retention_count: u32,
) -> Result<usize, BackupError> {
    let names = transport.list(remote).await?;
    let expired = select_expired(&names, database, retention_count);

    if expired.is_empty() {
        debug!(database, retention_count, "Nothing to prune");
        return Ok(0);
    }

    for name in &expired {
        transport.remove(remote, name).await?;
        info!(artifact = %name, "Pruned expired artifact");
    }

    Ok(expired.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_expired_keeps_newest() {
        // T1 < T2 < T3 < T4, retain 2 -> T1 and T2 expire.
        let remote = names(&[
            "hospital_20250101_100000.sql",
            "hospital_20250101_101500.sql",
            "hospital_20250102_100000.sql",
            "hospital_20250103_100000.sql",
        ]);

        let expired = select_expired(&remote, "hospital", 2);
        assert_eq!(
            expired,
            names(&[
                "hospital_20250101_101500.sql",
                "hospital_20250101_100000.sql",
            ])
        );
    }

    #[test]
    fn test_select_expired_never_over_deletes() {
        let remote = names(&["hospital_20250101_100000.sql"]);
        assert!(select_expired(&remote, "hospital", 7).is_empty());
        assert!(select_expired(&[], "hospital", 0).is_empty());
    }

    #[test]
    fn test_select_expired_retention_zero_expires_all() {
        let remote = names(&[
            "hospital_20250101_100000.sql",
            "hospital_20250102_100000.sql",
        ]);
        assert_eq!(select_expired(&remote, "hospital", 0).len(), 2);
    }

    #[test]
    fn test_foreign_files_are_ignored() {
        let remote = names(&[
            "hospital_20250101_100000.sql",
            "clinic_20250102_100000.sql",
            "notes.txt",
        ]);

        let expired = select_expired(&remote, "hospital", 0);
        assert_eq!(expired, names(&["hospital_20250101_100000.sql"]));
    }

    #[test]
    fn test_same_second_suffix_orders_after_plain() {
        let remote = names(&[
            "hospital_20250101_100000.sql",
            "hospital_20250101_100000_1.sql",
        ]);

        // The suffixed run happened later within the same second.
        let sorted = sorted_artifacts(&remote, "hospital");
        assert_eq!(sorted[0], "hospital_20250101_100000_1.sql");
    }
}
