//! Unbeatable - play tic-tac-toe against a minimax engine.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io;
use unbeatable::{init_tracing, run_audit, run_play, Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(),
        Command::Audit { json } => run_audit(json, &mut io::stdout().lock()).map(|_| ()),
    }
}
