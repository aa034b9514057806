//! CLI interface module
//!
//! This module provides command-line interface functionality for sql2es.

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::Sql2EsError;
use commands::{config_generate, convert_sql};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<Sql2EsError> for CliError {
    fn from(err: Sql2EsError) -> Self {
        match err {
            Sql2EsError::Convert(msg) => CliError::ParseError(msg),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::CommandError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is dispatched by the binary and never reaches this function.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Convert { sql } => convert_sql(&sql),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),
    }
}
