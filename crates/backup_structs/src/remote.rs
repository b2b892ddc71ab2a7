//! Remote target descriptors (`host:path`).

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

/// A remote destination for backup artifacts, in `host:path` form as
/// accepted by `scp`. The host part may carry a user (`user@host`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteTarget {
    pub host: String,
    pub path: String,
}

impl RemoteTarget {
    /// Returns the remote path of a file inside the remote directory, as
    /// used by the transport's `scp`/`ssh` invocations.
    #[must_use]
    pub fn file_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.path)
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.path)
    }
}

/// Error type for remote target parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRemoteError {
    /// The invalid input string.
    pub input: String,
}

impl fmt::Display for ParseRemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid remote target '{}', expected host:path",
            self.input
        )
    }
}

impl core::error::Error for ParseRemoteError {}

impl FromStr for RemoteTarget {
    type Err = ParseRemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, path) = s.split_once(':').ok_or_else(|| ParseRemoteError {
            input: s.to_string(),
        })?;

        if host.is_empty() || path.is_empty() {
            return Err(ParseRemoteError {
                input: s.to_string(),
            });
        }

        Ok(Self {
            host: host.to_string(),
            // A trailing slash would double up when joining file names.
            path: path.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_and_path() {
        let target: RemoteTarget = "backup@vault01:/srv/backups".parse().unwrap();
        assert_eq!(target.host, "backup@vault01");
        assert_eq!(target.path, "/srv/backups");
        assert_eq!(target.to_string(), "backup@vault01:/srv/backups");
    }

    #[test]
    fn test_parse_trims_trailing_slash() {
        let target: RemoteTarget = "vault01:/srv/backups/".parse().unwrap();
        assert_eq!(
            target.file_path("hospital_20250101_100000.sql"),
            "/srv/backups/hospital_20250101_100000.sql"
        );
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!("vault01".parse::<RemoteTarget>().is_err());
        assert!(":/srv/backups".parse::<RemoteTarget>().is_err());
        assert!("vault01:".parse::<RemoteTarget>().is_err());
    }
}
