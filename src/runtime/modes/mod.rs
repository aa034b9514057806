//! Mode routing
//!
//! Unified entry points for the execution modes:
//! - Server mode (HTTP server, default)
//! - CLI mode (offline conversion and config helpers)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

/// Detect which mode to run from the parsed subcommand
///
/// No subcommand and `serve` both start the server; everything else is CLI.
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
