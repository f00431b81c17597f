use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netcheck: terminal network diagnostic tool
///
/// Checks local and external connectivity, explains what is broken,
/// and watches the connection for changes.
#[derive(Parser, Debug)]
#[command(name = "netcheck")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show basic network status
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run ping and DNS tests
    #[command(alias = "p")]
    Ping {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a complete diagnostic report
    #[command(alias = "f")]
    Full {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monitor the connection continuously
    #[command(alias = "m")]
    Monitor {
        /// Check interval in seconds (default: config)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}
