//! Error types for authwire
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::AuthenticatorKind;
use thiserror::Error;

/// The main error type for authwire
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid authenticator config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid config for authenticator '{kind}': {message}")]
    AuthenticatorConfig {
        kind: AuthenticatorKind,
        message: String,
    },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Server Registration Errors
    // ============================================================================
    #[error("Authentication scheme '{name}' is already registered")]
    DuplicateScheme { name: String },

    #[error("Authentication strategy '{name}' is already registered")]
    DuplicateStrategy { name: String },

    #[error("Authentication scheme '{scheme}' not found for strategy '{strategy}'")]
    UnknownScheme { scheme: String, strategy: String },

    #[error("Authentication strategy '{name}' not found")]
    UnknownStrategy { name: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an error for a variant config that failed to parse or validate
    pub fn authenticator_config(kind: AuthenticatorKind, message: impl Into<String>) -> Self {
        Self::AuthenticatorConfig {
            kind,
            message: message.into(),
        }
    }

    /// Create a duplicate scheme error
    pub fn duplicate_scheme(name: impl Into<String>) -> Self {
        Self::DuplicateScheme { name: name.into() }
    }

    /// Create a duplicate strategy error
    pub fn duplicate_strategy(name: impl Into<String>) -> Self {
        Self::DuplicateStrategy { name: name.into() }
    }

    /// Create an unknown scheme error
    pub fn unknown_scheme(scheme: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self::UnknownScheme {
            scheme: scheme.into(),
            strategy: strategy.into(),
        }
    }

    /// Create an unknown strategy error
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy { name: name.into() }
    }
}

/// Result type alias for authwire
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
