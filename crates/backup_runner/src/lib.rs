//! Backup orchestration: dump, verify, transfer, retain, report.
//!
//! The orchestrator drives two external collaborators behind the
//! [`ports::DumpClient`] and [`ports::Transport`] traits. Production runs
//! use `pg_dump` and `scp`/`ssh`; tests swap in in-memory fakes.

pub mod orchestrator;
pub mod pg_dump;
pub mod ports;
pub mod retention;
pub mod scp;
pub mod verify;

pub use orchestrator::Orchestrator;
pub use pg_dump::PgDump;
pub use ports::{DumpClient, Transport};
pub use scp::ScpTransport;
