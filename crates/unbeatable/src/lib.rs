//! Unbeatable - console front end
//!
//! Thin I/O around [`unbeatable_core`]: argument parsing, tracing setup,
//! and a console session that reads moves and prints boards.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod console;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Commands
pub use commands::{init_tracing, run_audit, run_play};

// Crate-level exports - Console
pub use console::{ConsoleSession, Tokens};
