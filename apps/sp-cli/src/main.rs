//! # sp-cli
//!
//! Command-line interface for the strategic-planning core.
//!
//! Drives the entry approval workflow and the achievement engine against
//! a local JSON-file store:
//! - `sp entry submit/approve/reject/list` — move data entries through
//!   the review queues
//! - `sp achievement compute/rollup` — compute achievement figures and
//!   bucket rollups from a JSON input file

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Strategic-planning core CLI — entry approval and achievement reports.
#[derive(Parser)]
#[command(name = "sp", version, about)]
struct Cli {
    /// Store directory for entries and the event log.
    #[arg(long, default_value = ".sp")]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage data entries and their approval workflow.
    Entry {
        #[command(subcommand)]
        command: commands::entry::EntryCommands,
    },
    /// Compute achievement figures and rollups.
    Achievement {
        #[command(subcommand)]
        command: commands::achievement::AchievementCommands,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sp_workflow=info".parse()?)
                .add_directive("sp_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Entry { command } => commands::entry::execute(command, &cli.store_dir),
        Commands::Achievement { command } => commands::achievement::execute(command),
    }
}
