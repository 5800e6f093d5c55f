//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// authwire CLI
#[derive(Parser, Debug)]
#[command(name = "authwire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Authenticator config file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build authenticators from the config and list them
    Check,

    /// Register schemes and authenticators into a strategy table and print it as JSON
    Strategies {
        /// Strategy to mark as the default
        #[arg(long)]
        default: Option<String>,
    },
}
