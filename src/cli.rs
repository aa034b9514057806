//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// sql2es - translate SQL SELECT statements into Elasticsearch query DSL
#[derive(Parser, Debug)]
#[command(name = "sql2es")]
#[command(version)]
#[command(about = "Translate SQL SELECT statements into Elasticsearch query DSL", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Convert a SQL statement offline and print the response envelope
    Convert {
        /// SQL SELECT statement
        sql: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_server() {
        let cli = Cli::try_parse_from(["sql2es"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_convert_with_global_config() {
        let cli =
            Cli::try_parse_from(["sql2es", "convert", "select * from t", "-c", "my.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("my.toml"));
        match cli.command {
            Some(Commands::Convert { sql }) => assert_eq!(sql, "select * from t"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_generate_args() {
        let cli = Cli::try_parse_from(["sql2es", "config", "generate", "out.toml", "--force"])
            .unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_sql() {
        assert!(Cli::try_parse_from(["sql2es", "convert"]).is_err());
    }
}
