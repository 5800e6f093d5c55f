//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::error::{Error, Result};
use crate::manager::AuthManager;
use crate::server::{AuthServer, StrategyTable};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check(),
            Commands::Strategies { default } => self.strategies(default.as_deref()),
        }
    }

    /// Load the manager from the config file
    fn load_manager(&self) -> Result<AuthManager> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::invalid_config("Config file not specified (use -C flag)"))?;
        AuthManager::from_file(path)
    }

    /// List authenticators and schemes
    fn check(&self) -> Result<()> {
        let manager = self.load_manager()?;

        println!("Authenticators ({}):", manager.len());
        for (name, auth) in manager
            .authenticator_names()
            .zip(manager.authenticators())
        {
            println!("  {name} -> strategy '{}'", auth.strategy_name());
        }

        println!("Schemes:");
        for scheme in manager.schemes() {
            println!("  {} ({} via {})", scheme.scheme_name, scheme.token_type, scheme.header);
        }

        Ok(())
    }

    /// Build a strategy table and print it
    fn strategies(&self, default: Option<&str>) -> Result<()> {
        let table = build_strategy_table(&self.load_manager()?, default)?;
        println!("{}", table.to_json_pretty()?);
        Ok(())
    }
}

/// Register a manager's schemes, then its authenticators, into a new table
pub fn build_strategy_table(manager: &AuthManager, default: Option<&str>) -> Result<StrategyTable> {
    let mut table = StrategyTable::new();
    for scheme in manager.schemes() {
        table.register_scheme(scheme)?;
    }
    manager.register(&mut table)?;

    if let Some(name) = default {
        table.set_default(name)?;
    }
    Ok(table)
}
