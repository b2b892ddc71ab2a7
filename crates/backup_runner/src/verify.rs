//! Artifact verification: size and content checksum.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use backup_structs::{Artifact, BackupError};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

const READ_BUF_SIZE: usize = 64 * 1024;

/// Checks the dump file and returns the verified [`Artifact`].
///
/// A zero-byte file is corrupt: it is deleted and the run fails, so the
/// staging directory never accumulates junk.
///
/// # Errors
///
/// Returns [`BackupError::Verification`] if the file is unreadable or
/// empty.
pub fn verify_artifact(
    local_path: &Path,
    created_at: DateTime<Utc>,
) -> Result<Artifact, BackupError> {
    let (size_bytes, checksum) = hash_file(local_path)
        .map_err(|e| BackupError::Verification(format!("{}: {e}", local_path.display())))?;

    if size_bytes == 0 {
        std::fs::remove_file(local_path).ok();
        return Err(BackupError::Verification(format!(
            "{} is empty, removed",
            local_path.display()
        )));
    }

    Ok(Artifact {
        local_path: local_path.to_path_buf(),
        size_bytes,
        checksum,
        created_at,
    })
}

/// Streams the file through SHA-256, returning size and hex digest.
fn hash_file(path: &Path) -> std::io::Result<(u64, String)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    let mut size_bytes: u64 = 0;

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size_bytes += n as u64;
    }

    Ok((size_bytes, format!("{:x}", hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_reports_size_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital_20250101_100000.sql");
        std::fs::write(&path, b"-- PostgreSQL database dump\n").unwrap();

        let artifact = verify_artifact(&path, Utc::now()).unwrap();
        assert_eq!(artifact.size_bytes, 28);
        assert_eq!(artifact.checksum.len(), 64);
        assert!(path.exists());
    }

    #[test]
    fn test_verify_deletes_empty_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital_20250101_100000.sql");
        std::fs::write(&path, b"").unwrap();

        let err = verify_artifact(&path, Utc::now()).unwrap_err();
        assert_eq!(err.kind(), backup_structs::ErrorKind::Verification);
        assert!(!path.exists());
    }

    #[test]
    fn test_verify_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sql");

        let err = verify_artifact(&path, Utc::now()).unwrap_err();
        assert_eq!(err.kind(), backup_structs::ErrorKind::Verification);
    }
}
