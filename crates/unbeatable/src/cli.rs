//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand};

/// Unbeatable - console tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Play tic-tac-toe against a computer that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tracing filter directives (e.g. "debug" or "unbeatable_core=debug").
    /// Falls back to RUST_LOG, then "warn". Logs go to stderr.
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively on the console
    Play,

    /// Play every possible human strategy against the engine and tally the results
    Audit {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
