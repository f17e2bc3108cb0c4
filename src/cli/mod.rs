//! CLI module for Bookwise
//!
//! Command-line parsing for the bookwise-server binary, built with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bookwise - MCP server for arithmetic and book search
#[derive(Parser, Debug)]
#[command(
    name = "bookwise-server",
    version,
    about = "Bookwise - MCP server for arithmetic and LLM-backed book search",
    long_about = "Serves the add, calculate and searchBooks MCP tools over HTTP\n\
                  (SSE and streamable HTTP) or stdio.\n\n\
                  Run without arguments to start the HTTP server.",
    after_help = "EXAMPLES:\n    \
                  bookwise-server                        # Start the HTTP server (reads bookwise.toml)\n    \
                  bookwise-server stdio                  # Serve MCP over stdin/stdout\n    \
                  bookwise-server config --validate      # Check the configuration\n    \
                  bookwise-server config --default       # Print a starter bookwise.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "bookwise.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Serve MCP over stdin/stdout
    Stdio,

    /// Show configuration information
    Config {
        /// Validate the configuration file, including referenced env vars
        #[arg(long)]
        validate: bool,

        /// Print the built-in default configuration instead of the file
        #[arg(long, conflicts_with = "validate")]
        default: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["bookwise-server"]).unwrap();
        assert_eq!(cli.command(), &Commands::Serve);
        assert_eq!(cli.config, PathBuf::from("bookwise.toml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bookwise-server", "stdio", "--config", "x.toml", "-v"]).unwrap();
        assert_eq!(cli.command(), &Commands::Stdio);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::try_parse_from(["bookwise-server", "config", "--validate"]).unwrap();
        assert_eq!(
            cli.command(),
            &Commands::Config {
                validate: true,
                default: false
            }
        );

        assert!(
            Cli::try_parse_from(["bookwise-server", "config", "--validate", "--default"]).is_err()
        );
    }
}
