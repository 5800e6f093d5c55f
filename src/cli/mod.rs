//! CLI module
//!
//! Command-line interface for inspecting authenticator configs.
//!
//! # Commands
//!
//! - `check` - Build the authenticators and list them
//! - `strategies` - Register everything into a strategy table and print it

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{build_strategy_table, Runner};
