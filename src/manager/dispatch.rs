//! Config tag dispatch
//!
//! Maps each recognized `type` tag to the constructor of its authenticator.
//! Tags missing from the table have no constructor and are skipped.

use crate::auth::{
    Authenticator, BasicAuthenticator, OAuthBearerAuthenticator,
    OAuthBearerLocalAndBasicAuthenticator, OAuthBearerLocalAuthenticator,
};
use crate::error::Result;
use crate::types::{AuthenticatorKind, JsonValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds an authenticator from its config entry
pub type Constructor = fn(&JsonValue) -> Result<Arc<dyn Authenticator>>;

/// What a recognized tag registers
#[derive(Clone, Copy)]
pub struct Dispatch {
    /// Variant built for the tag
    pub kind: AuthenticatorKind,
    /// Variant constructor
    pub construct: Constructor,
}

fn oauth_bearer_token(config: &JsonValue) -> Result<Arc<dyn Authenticator>> {
    Ok(Arc::new(OAuthBearerAuthenticator::new(config)?))
}

fn basic_token(config: &JsonValue) -> Result<Arc<dyn Authenticator>> {
    Ok(Arc::new(BasicAuthenticator::new(config)?))
}

fn oauth_bearer_local(config: &JsonValue) -> Result<Arc<dyn Authenticator>> {
    Ok(Arc::new(OAuthBearerLocalAuthenticator::new(config)?))
}

fn oauth_bearer_local_and_basic(config: &JsonValue) -> Result<Arc<dyn Authenticator>> {
    Ok(Arc::new(OAuthBearerLocalAndBasicAuthenticator::new(config)?))
}

static DISPATCH: Lazy<HashMap<&'static str, Dispatch>> = Lazy::new(|| {
    let entries = [
        Dispatch {
            kind: AuthenticatorKind::OauthBearerToken,
            construct: oauth_bearer_token,
        },
        Dispatch {
            kind: AuthenticatorKind::BasicToken,
            construct: basic_token,
        },
        Dispatch {
            kind: AuthenticatorKind::OauthBearerLocal,
            construct: oauth_bearer_local,
        },
        Dispatch {
            kind: AuthenticatorKind::OauthBearerLocalAndBasic,
            construct: oauth_bearer_local_and_basic,
        },
    ];

    entries
        .into_iter()
        .map(|entry| (entry.kind.as_str(), entry))
        .collect()
});

/// Look up the dispatch entry for a config `type` tag
pub fn lookup(tag: &str) -> Option<Dispatch> {
    DISPATCH.get(tag).copied()
}

/// The `type` tag of a config entry, if it has a string one
pub fn config_tag(config: &JsonValue) -> Option<&str> {
    config.get("type").and_then(JsonValue::as_str)
}
