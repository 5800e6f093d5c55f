//! Registration target for authenticators
//!
//! `AuthServer` is the part of a server's authentication subsystem that
//! authenticators write into at startup: schemes first, then strategies
//! bound to those schemes. `StrategyTable` is an in-memory implementation.

use crate::error::{Error, Result};
use crate::scheme::Scheme;
use crate::types::AuthenticatorKind;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A named authentication strategy bound to a scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strategy {
    /// Strategy name routes refer to
    pub name: String,
    /// Name of the scheme this strategy relies on
    pub scheme: String,
    /// Authenticator variant that registered it
    pub kind: AuthenticatorKind,
    /// Non-secret options describing the strategy
    pub options: BTreeMap<String, String>,
}

impl Strategy {
    /// Create a strategy with no options
    pub fn new(
        name: impl Into<String>,
        scheme: impl Into<String>,
        kind: AuthenticatorKind,
    ) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            kind,
            options: BTreeMap::new(),
        }
    }

    /// Add an option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.options.insert(key.into(), value.to_string());
        self
    }

    /// Add an option only if a value is present
    #[must_use]
    pub fn option_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.option(key, value),
            None => self,
        }
    }
}

/// Server-side authentication registry that authenticators register against
pub trait AuthServer {
    /// Register a security scheme
    fn register_scheme(&mut self, scheme: Arc<Scheme>) -> Result<()>;

    /// Register a strategy bound to a previously registered scheme
    fn register_strategy(&mut self, strategy: Strategy) -> Result<()>;
}

/// In-memory scheme and strategy table
#[derive(Debug, Default, Serialize)]
pub struct StrategyTable {
    schemes: Vec<Arc<Scheme>>,
    strategies: Vec<Strategy>,
    default_strategy: Option<String>,
    #[serde(skip)]
    strategy_index: HashMap<String, usize>,
}

impl StrategyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered schemes, in registration order
    pub fn schemes(&self) -> &[Arc<Scheme>] {
        &self.schemes
    }

    /// Registered strategies, in registration order
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Look up a strategy by name
    pub fn strategy(&self, name: &str) -> Option<&Strategy> {
        self.strategy_index.get(name).map(|&i| &self.strategies[i])
    }

    /// Look up a scheme by name
    pub fn scheme(&self, name: &str) -> Option<&Arc<Scheme>> {
        self.schemes.iter().find(|s| s.scheme_name == name)
    }

    /// Mark a registered strategy as the default for routes without one
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.strategy_index.contains_key(name) {
            return Err(Error::unknown_strategy(name));
        }
        self.default_strategy = Some(name.to_string());
        Ok(())
    }

    /// The default strategy, if one was set
    pub fn default_strategy(&self) -> Option<&Strategy> {
        self.default_strategy
            .as_deref()
            .and_then(|name| self.strategy(name))
    }

    /// Export the table as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl AuthServer for StrategyTable {
    fn register_scheme(&mut self, scheme: Arc<Scheme>) -> Result<()> {
        if self.scheme(&scheme.scheme_name).is_some() {
            return Err(Error::duplicate_scheme(&scheme.scheme_name));
        }
        tracing::debug!(scheme = %scheme.scheme_name, "Registered auth scheme");
        self.schemes.push(scheme);
        Ok(())
    }

    fn register_strategy(&mut self, strategy: Strategy) -> Result<()> {
        if self.scheme(&strategy.scheme).is_none() {
            return Err(Error::unknown_scheme(&strategy.scheme, &strategy.name));
        }
        if self.strategy_index.contains_key(&strategy.name) {
            return Err(Error::duplicate_strategy(&strategy.name));
        }
        tracing::debug!(
            strategy = %strategy.name,
            scheme = %strategy.scheme,
            kind = %strategy.kind,
            "Registered auth strategy"
        );
        self.strategy_index
            .insert(strategy.name.clone(), self.strategies.len());
        self.strategies.push(strategy);
        Ok(())
    }
}
