//! CLI module for Coinplay
//!
//! Provides command-line interface parsing and handling for the coinplay-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

/// Deployment scaffolding for the `init` subcommand.
pub mod init;
/// Colored terminal output helpers.
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Coinplay - Credential-Gated Wager Backend
///
/// A wager admission server with account registration, JWT sessions, and
/// balance-checked game creation over SQLite or Turso.
#[derive(Parser, Debug)]
#[command(
    name = "coinplay-server",
    author = "Coinplay <dev@coinplay.io>",
    version,
    about = "Coinplay - Credential-Gated Wager Backend",
    long_about = "A wager admission server with account registration, JWT sessions,\n\
                  and balance-checked game creation over SQLite or Turso.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new deployment.",
    after_help = "EXAMPLES:\n    \
                  coinplay-server init              # Scaffold a new Coinplay deployment\n    \
                  coinplay-server                   # Start the server (requires coinplay.toml)\n    \
                  coinplay-server --config my.toml  # Use a custom config file\n    \
                  coinplay-server config --validate # Check the config and referenced env vars"
)]
pub struct Cli {
    /// Configuration file to load
    #[arg(short, long, default_value = "coinplay.toml", global = true)]
    pub config: PathBuf,

    /// Verbose log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Turn off ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand; absent means run the server
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Coinplay deployment with configuration files
    ///
    /// Creates coinplay.toml, .env.example and the data/ directory with
    /// everything needed to run a Coinplay server.
    Init {
        /// Target directory for the scaffold
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite files that already exist
        #[arg(short, long)]
        force: bool,

        /// Listen host written into the generated config
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port written into the generated config
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Inspect the loaded configuration
    Config {
        /// Print the full TOML
        #[arg(short = 'f', long)]
        full: bool,

        /// Check the file and its referenced env vars
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse from process argv.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
