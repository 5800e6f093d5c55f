//! AuthManager implementation
//!
//! Builds authenticators from config entries, tracks the schemes they rely
//! on, and registers them against a server at startup.

use super::dispatch::{config_tag, lookup};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::loader::{load_auth_config, load_auth_config_from_str, ConfigFormat};
use crate::scheme::Scheme;
use crate::server::AuthServer;
use crate::types::JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of schemes and authenticators built from config
///
/// Both mappings keep insertion order and are only written during
/// construction. Duplicate keys and unknown config types are dropped
/// silently; the first registration under a key wins.
#[derive(Default)]
pub struct AuthManager {
    schemes: Vec<Arc<Scheme>>,
    scheme_index: HashMap<String, usize>,
    authenticators: Vec<(String, Arc<dyn Authenticator>)>,
    authenticator_index: HashMap<String, usize>,
}

impl AuthManager {
    /// Build a manager from a JSON array of authenticator configs
    ///
    /// Fails if `configs` is null or not an array, or if an authenticator
    /// rejects its config entry.
    pub fn new(configs: &JsonValue) -> Result<Self> {
        let mut manager = Self::default();
        manager.apply_dependencies(configs)?;
        Ok(manager)
    }

    /// Build a manager from a YAML or JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(&load_auth_config(path)?)
    }

    /// Build a manager from a YAML config string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::new(&load_auth_config_from_str(yaml, ConfigFormat::Yaml)?)
    }

    /// Add a scheme; returns `false` if one with the same name already exists
    pub fn add_scheme(&mut self, scheme: Arc<Scheme>) -> bool {
        if self.scheme_index.contains_key(&scheme.scheme_name) {
            return false;
        }

        self.scheme_index
            .insert(scheme.scheme_name.clone(), self.schemes.len());
        self.schemes.push(scheme);
        true
    }

    /// All registered schemes, in insertion order
    pub fn schemes(&self) -> Vec<Arc<Scheme>> {
        self.schemes.clone()
    }

    /// Look up a scheme by name
    pub fn scheme(&self, name: &str) -> Option<Arc<Scheme>> {
        self.scheme_index
            .get(name)
            .map(|&i| Arc::clone(&self.schemes[i]))
    }

    /// Add an authenticator; returns `false` if the name is already taken
    pub fn add_authenticator(
        &mut self,
        name: impl Into<String>,
        authenticator: Arc<dyn Authenticator>,
    ) -> bool {
        let name = name.into();
        if self.authenticator_index.contains_key(&name) {
            return false;
        }

        self.authenticator_index
            .insert(name.clone(), self.authenticators.len());
        self.authenticators.push((name, authenticator));
        true
    }

    /// Get an authenticator by name
    ///
    /// With no name (or an empty one) this returns the first registered
    /// authenticator. Only rely on that when exactly one is registered.
    pub fn get_authenticator(&self, name: Option<&str>) -> Option<Arc<dyn Authenticator>> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => self
                .authenticator_index
                .get(name)
                .map(|&i| Arc::clone(&self.authenticators[i].1)),
            None => self
                .authenticators
                .first()
                .map(|(_, auth)| Arc::clone(auth)),
        }
    }

    /// All registered authenticators, in insertion order
    pub fn authenticators(&self) -> Vec<Arc<dyn Authenticator>> {
        self.authenticators
            .iter()
            .map(|(_, auth)| Arc::clone(auth))
            .collect()
    }

    /// Names the authenticators are stored under, in insertion order
    pub fn authenticator_names(&self) -> impl Iterator<Item = &str> {
        self.authenticators.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered authenticators
    pub fn len(&self) -> usize {
        self.authenticators.len()
    }

    /// Whether no authenticator is registered
    pub fn is_empty(&self) -> bool {
        self.authenticators.is_empty()
    }

    /// Build authenticators and schemes from config entries
    fn apply_dependencies(&mut self, configs: &JsonValue) -> Result<()> {
        if configs.is_null() {
            return Err(Error::invalid_config("Authenticator config is null"));
        }
        let entries = configs
            .as_array()
            .ok_or_else(|| Error::invalid_config("Authenticator config must be an array"))?;

        for (position, config) in entries.iter().enumerate() {
            if config.is_null() {
                return Err(Error::invalid_config(format!(
                    "Authenticator config entry {position} is null"
                )));
            }
            let Some(tag) = config_tag(config) else {
                debug!(position, "Skipping authenticator config without a type");
                continue;
            };
            let Some(dispatch) = lookup(tag) else {
                debug!(position, tag, "Ignoring unknown authenticator type");
                continue;
            };

            // Built even when the tag is already taken, so a bad duplicate still fails.
            let authenticator = (dispatch.construct)(config)?;
            if !self.add_scheme(authenticator.scheme()) {
                debug!(tag, "Scheme already registered");
            }
            if self.add_authenticator(tag, authenticator) {
                debug!(position, tag, "Added authenticator");
            } else {
                debug!(position, tag, "Dropping duplicate authenticator config");
            }
        }

        Ok(())
    }

    /// Register every authenticator with the server, in insertion order
    ///
    /// Stops at the first authenticator that fails and returns its error.
    pub fn register(&self, server: &mut dyn AuthServer) -> Result<()> {
        for (name, authenticator) in &self.authenticators {
            debug!(
                authenticator = %name,
                strategy = authenticator.strategy_name(),
                "Registering authenticator"
            );
            authenticator.register(server)?;
        }

        info!(
            authenticators = self.authenticators.len(),
            "Registered authenticators"
        );
        Ok(())
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("schemes", &self.schemes)
            .field("authenticators", &self.authenticators)
            .finish()
    }
}
