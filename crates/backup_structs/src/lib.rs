//! Domain types for the pgvault backup orchestrator.
//!
//! One orchestrator run produces one [`Artifact`] described by a
//! [`BackupJob`] and summarized in a [`BackupReport`].

pub mod artifact;
pub mod error;
pub mod job;
pub mod naming;
pub mod remote;
pub mod report;

pub use artifact::Artifact;
pub use error::{BackupError, ErrorKind};
pub use job::BackupJob;
pub use naming::ArtifactStamp;
pub use remote::RemoteTarget;
pub use report::{BackupReport, BackupStatus};
