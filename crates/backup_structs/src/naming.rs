//! Artifact file naming and embedded-timestamp parsing.
//!
//! Artifacts are named `{database}_{YYYYMMDD_HHMMSS}.sql` in UTC. When a
//! name with the same database and second has already been issued in this
//! process, later names get a `_N` sequence suffix so names stay unique
//! without recomputing the timestamp mid-run.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format of the timestamp embedded in artifact file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Length of a formatted timestamp (`YYYYMMDD_HHMMSS`).
const TIMESTAMP_LEN: usize = 15;

/// Sequence numbers already issued per `{database}_{stamp}` prefix.
///
/// A previously seen stamp resumes its sequence rather than restarting at
/// zero, so no name is ever handed out twice in one process. The map grows
/// by one entry per distinct second a job was created in, negligible for a
/// one-job-per-invocation tool.
static ISSUED: LazyLock<Mutex<HashMap<String, u32>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Produces the artifact file name for a job created at `created_at`.
///
/// Injective across repeated calls in the same process: later calls for an
/// already-issued `{database}_{stamp}` prefix get a `_1`, `_2`, ... suffix,
/// regardless of what was issued in between.
#[must_use]
pub fn artifact_file_name(database: &str, created_at: DateTime<Utc>) -> String {
    let stamp = created_at.format(TIMESTAMP_FORMAT).to_string();
    let prefix = format!("{database}_{stamp}");

    let mut issued = match ISSUED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    let counter = issued.entry(prefix.clone()).or_insert(0);
    let sequence = *counter;
    *counter += 1;

    if sequence == 0 {
        format!("{prefix}.sql")
    } else {
        format!("{prefix}_{sequence}.sql")
    }
}

/// Timestamp (and same-second sequence number) embedded in an artifact
/// file name. Orders artifacts for retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArtifactStamp {
    pub timestamp: NaiveDateTime,
    pub sequence: u32,
}

/// Parses the stamp out of an artifact file name for `database`.
///
/// Returns `None` for names that do not belong to this database or do not
/// follow the `{database}_{YYYYMMDD_HHMMSS}[_N].sql` pattern, so foreign
/// files on the remote host are never considered for retention.
#[must_use]
pub fn parse_artifact_name(database: &str, file_name: &str) -> Option<ArtifactStamp> {
    let stem = file_name
        .strip_prefix(database)?
        .strip_prefix('_')?
        .strip_suffix(".sql")?;

    if stem.len() < TIMESTAMP_LEN {
        return None;
    }

    let (stamp_str, rest) = stem.split_at(TIMESTAMP_LEN);
    let timestamp = NaiveDateTime::parse_from_str(stamp_str, TIMESTAMP_FORMAT).ok()?;

    let sequence = if rest.is_empty() {
        0
    } else {
        rest.strip_prefix('_')?.parse::<u32>().ok()?
    };

    Some(ArtifactStamp {
        timestamp,
        sequence,
    })
}
