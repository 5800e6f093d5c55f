//! Common types used throughout authwire
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Authenticator Kind
// ============================================================================

/// The closed set of authenticator variants, keyed by config `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticatorKind {
    /// Bearer token checked against a remote OAuth2 server
    OauthBearerToken,
    /// Bearer token carrying base64 `client_id:client_secret`
    BasicToken,
    /// Bearer token that is a locally verifiable JWT
    OauthBearerLocal,
    /// Accepts either a local JWT or a basic token
    OauthBearerLocalAndBasic,
}

impl AuthenticatorKind {
    /// All kinds, in dispatch table order
    pub const ALL: [AuthenticatorKind; 4] = [
        AuthenticatorKind::OauthBearerToken,
        AuthenticatorKind::BasicToken,
        AuthenticatorKind::OauthBearerLocal,
        AuthenticatorKind::OauthBearerLocalAndBasic,
    ];

    /// The config `type` tag for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            AuthenticatorKind::OauthBearerToken => "oauth_bearer_token",
            AuthenticatorKind::BasicToken => "basic_token",
            AuthenticatorKind::OauthBearerLocal => "oauth_bearer_local",
            AuthenticatorKind::OauthBearerLocalAndBasic => "oauth_bearer_local_and_basic",
        }
    }
}

impl fmt::Display for AuthenticatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthenticatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown authenticator type: {s}"))
    }
}

// ============================================================================
// JWT Algorithm
// ============================================================================

/// Signing algorithm accepted for locally verified bearer tokens
///
/// Restricted to the shared-secret (HMAC) family: local authenticators
/// are configured with a secret, not a key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HmacAlgorithm {
    /// HMAC using SHA-256
    #[default]
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
}

impl From<HmacAlgorithm> for jsonwebtoken::Algorithm {
    fn from(alg: HmacAlgorithm) -> Self {
        match alg {
            HmacAlgorithm::HS256 => jsonwebtoken::Algorithm::HS256,
            HmacAlgorithm::HS384 => jsonwebtoken::Algorithm::HS384,
            HmacAlgorithm::HS512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HmacAlgorithm::HS256 => "HS256",
            HmacAlgorithm::HS384 => "HS384",
            HmacAlgorithm::HS512 => "HS512",
        };
        f.write_str(name)
    }
}
