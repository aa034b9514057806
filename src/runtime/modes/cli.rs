//! CLI mode
//!
//! Delegates to the actual CLI implementation.

use crate::cli::Commands;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run CLI mode
pub async fn run_cli(command: Commands) -> Result<(), CliError> {
    run_cli_command(command).await
}
