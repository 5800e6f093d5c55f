//! Authenticator implementations
//!
//! Each variant is built from one config entry and knows how to register
//! itself as a strategy against an `AuthServer`.

use super::types::{
    parse_config, BasicClient, BasicTokenConfig, OAuthBearerConfig,
    OAuthBearerLocalAndBasicConfig, OAuthBearerLocalConfig,
};
use crate::error::{Error, Result};
use crate::scheme::{bearer_scheme, Scheme};
use crate::server::{AuthServer, Strategy};
use crate::types::{AuthenticatorKind, HmacAlgorithm, JsonValue};
use jsonwebtoken::Validation;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A strategy object that registers itself against a server's auth subsystem
pub trait Authenticator: fmt::Debug + Send + Sync {
    /// Which variant this is
    fn kind(&self) -> AuthenticatorKind;

    /// Name the strategy is registered under
    fn strategy_name(&self) -> &str;

    /// Scheme the strategy relies on
    fn scheme(&self) -> Arc<Scheme> {
        bearer_scheme()
    }

    /// Describe the strategy this authenticator registers
    fn strategy(&self) -> Strategy;

    /// Register this authenticator with the server
    fn register(&self, server: &mut dyn AuthServer) -> Result<()> {
        server.register_strategy(self.strategy())
    }
}

fn strategy_name(name: Option<String>, kind: AuthenticatorKind) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| kind.as_str().to_string())
}

// ============================================================================
// OAuth Bearer (remote)
// ============================================================================

/// Validates bearer tokens by asking a remote OAuth2 introspection endpoint
#[derive(Debug)]
pub struct OAuthBearerAuthenticator {
    name: String,
    url: Url,
    timeout: Duration,
    client_id: Option<String>,
    scopes: Vec<String>,
}

impl OAuthBearerAuthenticator {
    const KIND: AuthenticatorKind = AuthenticatorKind::OauthBearerToken;

    /// Build from a raw config entry
    pub fn new(config: &JsonValue) -> Result<Self> {
        Self::from_config(parse_config(Self::KIND, config)?)
    }

    /// Build from a typed config
    pub fn from_config(config: OAuthBearerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|m| Error::authenticator_config(Self::KIND, m))?;

        let url = Url::parse(&config.url).map_err(|e| {
            Error::authenticator_config(Self::KIND, format!("invalid url '{}': {e}", config.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::authenticator_config(
                Self::KIND,
                format!("url must be http or https, got '{}'", url.scheme()),
            ));
        }

        Ok(Self {
            name: strategy_name(config.name, Self::KIND),
            url,
            timeout: Duration::from_millis(config.timeout_ms),
            client_id: config.client_id,
            scopes: config.scopes,
        })
    }

    /// Introspection endpoint
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Timeout for the introspection call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Scopes a token must carry
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

impl Authenticator for OAuthBearerAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        Self::KIND
    }

    fn strategy_name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        let scopes = (!self.scopes.is_empty()).then(|| self.scopes.join(" "));
        Strategy::new(&self.name, &self.scheme().scheme_name, Self::KIND)
            .option("url", &self.url)
            .option("timeout_ms", self.timeout.as_millis())
            .option_opt("client_id", self.client_id.as_deref())
            .option_opt("scopes", scopes)
    }
}

// ============================================================================
// Basic Token
// ============================================================================

/// Accepts bearer values that encode a known `client_id:client_secret` pair
#[derive(Debug)]
pub struct BasicAuthenticator {
    name: String,
    clients: Vec<BasicClient>,
}

impl BasicAuthenticator {
    const KIND: AuthenticatorKind = AuthenticatorKind::BasicToken;

    /// Build from a raw config entry
    pub fn new(config: &JsonValue) -> Result<Self> {
        Self::from_config(parse_config(Self::KIND, config)?)
    }

    /// Build from a typed config
    pub fn from_config(config: BasicTokenConfig) -> Result<Self> {
        Self::build(Self::KIND, config)
    }

    fn build(kind: AuthenticatorKind, config: BasicTokenConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|m| Error::authenticator_config(kind, m))?;

        Ok(Self {
            name: strategy_name(config.name, kind),
            clients: config.clients,
        })
    }

    /// IDs of the accepted clients, in config order
    pub fn client_ids(&self) -> impl Iterator<Item = &str> {
        self.clients.iter().map(|c| c.client_id.as_str())
    }

    /// Whether a client ID is accepted
    pub fn has_client(&self, client_id: &str) -> bool {
        self.clients.iter().any(|c| c.client_id == client_id)
    }
}

impl Authenticator for BasicAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        Self::KIND
    }

    fn strategy_name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        Strategy::new(&self.name, &self.scheme().scheme_name, Self::KIND)
            .option("clients", self.clients.len())
    }
}

// ============================================================================
// OAuth Bearer (local)
// ============================================================================

/// Validates bearer tokens as JWTs signed with a shared secret
pub struct OAuthBearerLocalAuthenticator {
    name: String,
    algorithm: HmacAlgorithm,
    issuer: Option<String>,
    audience: Option<String>,
    validation: Validation,
}

impl OAuthBearerLocalAuthenticator {
    const KIND: AuthenticatorKind = AuthenticatorKind::OauthBearerLocal;

    /// Build from a raw config entry
    pub fn new(config: &JsonValue) -> Result<Self> {
        Self::from_config(parse_config(Self::KIND, config)?)
    }

    /// Build from a typed config
    pub fn from_config(config: OAuthBearerLocalConfig) -> Result<Self> {
        Self::build(Self::KIND, config)
    }

    fn build(kind: AuthenticatorKind, config: OAuthBearerLocalConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|m| Error::authenticator_config(kind, m))?;

        let mut validation = Validation::new(config.algorithm.into());
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            name: strategy_name(config.name, kind),
            algorithm: config.algorithm,
            issuer: config.issuer,
            audience: config.audience,
            validation,
        })
    }

    /// Claim validation rules
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    fn options(&self, strategy: Strategy) -> Strategy {
        strategy
            .option("algorithm", self.algorithm)
            .option_opt("issuer", self.issuer.as_deref())
            .option_opt("audience", self.audience.as_deref())
    }
}

impl fmt::Debug for OAuthBearerLocalAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthBearerLocalAuthenticator")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

impl Authenticator for OAuthBearerLocalAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        Self::KIND
    }

    fn strategy_name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        self.options(Strategy::new(
            &self.name,
            &self.scheme().scheme_name,
            Self::KIND,
        ))
    }
}

// ============================================================================
// OAuth Bearer (local) and Basic
// ============================================================================

/// Accepts either a locally verifiable JWT or a basic token
#[derive(Debug)]
pub struct OAuthBearerLocalAndBasicAuthenticator {
    name: String,
    local: OAuthBearerLocalAuthenticator,
    basic: BasicAuthenticator,
}

impl OAuthBearerLocalAndBasicAuthenticator {
    const KIND: AuthenticatorKind = AuthenticatorKind::OauthBearerLocalAndBasic;

    /// Build from a raw config entry
    pub fn new(config: &JsonValue) -> Result<Self> {
        Self::from_config(parse_config(Self::KIND, config)?)
    }

    /// Build from a typed config
    pub fn from_config(config: OAuthBearerLocalAndBasicConfig) -> Result<Self> {
        let basic = BasicTokenConfig {
            name: config.local.name.clone(),
            clients: config.clients,
        };
        let local = OAuthBearerLocalAuthenticator::build(Self::KIND, config.local)?;

        Ok(Self {
            name: local.name.clone(),
            basic: BasicAuthenticator::build(Self::KIND, basic)?,
            local,
        })
    }

    /// The JWT half
    pub fn local(&self) -> &OAuthBearerLocalAuthenticator {
        &self.local
    }

    /// The basic token half
    pub fn basic(&self) -> &BasicAuthenticator {
        &self.basic
    }
}

impl Authenticator for OAuthBearerLocalAndBasicAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        Self::KIND
    }

    fn strategy_name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> Strategy {
        let strategy = Strategy::new(&self.name, &self.scheme().scheme_name, Self::KIND);
        self.local
            .options(strategy)
            .option("clients", self.basic.clients.len())
    }
}
