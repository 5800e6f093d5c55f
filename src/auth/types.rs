//! Authenticator configuration types
//!
//! Each variant reads its own slice of a config entry. The `type` tag is
//! consumed by the manager's dispatch and ignored here.

use crate::error::{Error, Result};
use crate::types::{AuthenticatorKind, HmacAlgorithm, JsonValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Secret config value that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Create a secret from a string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Deserialize a variant config from a raw config entry
pub(crate) fn parse_config<T: DeserializeOwned>(
    kind: AuthenticatorKind,
    value: &JsonValue,
) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::authenticator_config(kind, e.to_string()))
}

// ============================================================================
// OAuth Bearer (remote)
// ============================================================================

/// Config for `oauth_bearer_token`: tokens are checked by a remote OAuth2 server
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthBearerConfig {
    /// Strategy name (defaults to the type tag)
    #[serde(default)]
    pub name: Option<String>,
    /// Token introspection endpoint
    pub url: String,
    /// Client ID used to authenticate against the endpoint
    #[serde(default)]
    pub client_id: Option<String>,
    /// Client secret used to authenticate against the endpoint
    #[serde(default)]
    pub client_secret: Option<Secret>,
    /// Scopes a token must carry
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Timeout for the introspection call in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

impl OAuthBearerConfig {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }
        if self.client_secret.is_some() && self.client_id.is_none() {
            return Err("client_secret requires client_id".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Basic Token
// ============================================================================

/// A client allowed to present a basic token
#[derive(Debug, Clone, Deserialize)]
pub struct BasicClient {
    /// Client ID
    pub client_id: String,
    /// Client secret
    pub client_secret: Secret,
}

/// Config for `basic_token`: bearer value is base64 `client_id:client_secret`
#[derive(Debug, Clone, Deserialize)]
pub struct BasicTokenConfig {
    /// Strategy name (defaults to the type tag)
    #[serde(default)]
    pub name: Option<String>,
    /// Accepted clients
    #[serde(default)]
    pub clients: Vec<BasicClient>,
}

impl BasicTokenConfig {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        validate_clients(&self.clients)
    }
}

fn validate_clients(clients: &[BasicClient]) -> std::result::Result<(), String> {
    if clients.is_empty() {
        return Err("at least one client is required".to_string());
    }

    let mut seen = HashSet::new();
    for client in clients {
        if client.client_id.trim().is_empty() {
            return Err("client_id cannot be empty".to_string());
        }
        if client.client_secret.is_blank() {
            return Err(format!(
                "client_secret for '{}' cannot be empty",
                client.client_id
            ));
        }
        if !seen.insert(client.client_id.as_str()) {
            return Err(format!("duplicate client_id '{}'", client.client_id));
        }
    }
    Ok(())
}

// ============================================================================
// OAuth Bearer (local)
// ============================================================================

/// Config for `oauth_bearer_local`: tokens are JWTs signed with a shared secret
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthBearerLocalConfig {
    /// Strategy name (defaults to the type tag)
    #[serde(default)]
    pub name: Option<String>,
    /// Shared signing secret
    pub secret: Secret,
    /// Signing algorithm
    #[serde(default)]
    pub algorithm: HmacAlgorithm,
    /// Expected `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,
    /// Expected `aud` claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl OAuthBearerLocalConfig {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.secret.is_blank() {
            return Err("secret cannot be empty".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// OAuth Bearer (local) and Basic
// ============================================================================

/// Config for `oauth_bearer_local_and_basic`: local and basic fields in one object
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthBearerLocalAndBasicConfig {
    /// JWT fields, including the strategy name
    #[serde(flatten)]
    pub local: OAuthBearerLocalConfig,
    /// Accepted basic clients
    #[serde(default)]
    pub clients: Vec<BasicClient>,
}
