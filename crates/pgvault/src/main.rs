//! pgvault
//!
//! A configuration-driven PostgreSQL backup utility: dump a database,
//! verify the dump, ship it to a remote host and rotate old backups there.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;

/// PostgreSQL backup and rotation utility
#[derive(Parser)]
#[command(name = "pgvault")]
#[command(about = "Dump, verify, ship and rotate PostgreSQL backups")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one backup: dump, verify, transfer, rotate
    Run {
        /// Database to dump
        #[arg(short, long)]
        database: Option<String>,

        /// Local staging directory for the dump
        #[arg(short, long)]
        backup_dir: Option<PathBuf>,

        /// Remote target, `host:path`
        #[arg(short, long)]
        remote: Option<String>,

        /// How many historical backups to keep at the remote target
        #[arg(long)]
        retain: Option<u32>,

        /// Deadline in seconds for the dump and transfer stages
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the run report as JSON instead of a status line
        #[arg(long)]
        json: bool,
    },

    /// List backups at the remote target, newest first
    List {
        /// Database whose backups to list
        #[arg(short, long)]
        database: Option<String>,

        /// Remote target, `host:path`
        #[arg(short, long)]
        remote: Option<String>,

        /// Deadline in seconds for the listing command
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Run {
            database,
            backup_dir,
            remote,
            retain,
            timeout_secs,
            json,
        } => {
            if let Some(database) = database {
                config.database = Some(database);
            }
            if let Some(backup_dir) = backup_dir {
                config.backup_dir = backup_dir;
            }
            if let Some(remote) = remote {
                config.remote = Some(remote);
            }
            if let Some(retain) = retain {
                config.retention_count = retain;
            }
            if let Some(timeout_secs) = timeout_secs {
                config.timeout_secs = timeout_secs;
            }

            commands::backup::run(config, json).await?;
        }
        Commands::List {
            database,
            remote,
            timeout_secs,
        } => {
            if let Some(database) = database {
                config.database = Some(database);
            }
            if let Some(remote) = remote {
                config.remote = Some(remote);
            }
            if let Some(timeout_secs) = timeout_secs {
                config.timeout_secs = timeout_secs;
            }

            commands::list::run(&config).await?;
        }
    }

    Ok(())
}
