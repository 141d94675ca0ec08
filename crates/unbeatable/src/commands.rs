//! Command implementations behind the CLI.

use crate::console::ConsoleSession;
use anyhow::Result;
use std::io::{self, Write};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use unbeatable_core::{audit, AuditReport};

/// Installs the global tracing subscriber, writing to stderr.
///
/// `directives` wins over `RUST_LOG`; with neither set only warnings show.
///
/// # Errors
///
/// Malformed filter directives.
pub fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Runs the interactive game on stdin/stdout.
///
/// # Errors
///
/// Console I/O failures and engine faults.
#[instrument]
pub fn run_play() -> Result<()> {
    info!("Starting console session");
    let stdin = io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), io::stdout().lock());
    session.run()
}

/// Plays every human strategy against the engine and prints the tally.
///
/// # Errors
///
/// Write failures, engine faults, or any strategy beating the engine.
#[instrument(skip(out))]
pub fn run_audit<W: Write>(json: bool, out: &mut W) -> Result<AuditReport> {
    let report = audit()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Games played:  {}", report.games())?;
        writeln!(out, "Human wins:    {}", report.human_wins())?;
        writeln!(out, "Computer wins: {}", report.computer_wins())?;
        writeln!(out, "Ties:          {}", report.ties())?;
        writeln!(out, "Nodes searched: {}", report.nodes())?;
    }

    if !report.engine_unbeaten() {
        anyhow::bail!("{} human strategies beat the engine", report.human_wins());
    }
    Ok(report)
}
