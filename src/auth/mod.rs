//! Authentication module
//!
//! Supports: OAuth2 bearer (remote introspection), Basic token,
//! OAuth2 bearer (local JWT), and local JWT combined with Basic token.
//!
//! Every variant implements `Authenticator`, is built from one config
//! entry, and registers a bearer-scheme strategy against an `AuthServer`.

mod authenticator;
mod types;

pub use authenticator::{
    Authenticator, BasicAuthenticator, OAuthBearerAuthenticator,
    OAuthBearerLocalAndBasicAuthenticator, OAuthBearerLocalAuthenticator,
};
pub use types::{
    BasicClient, BasicTokenConfig, OAuthBearerConfig, OAuthBearerLocalAndBasicConfig,
    OAuthBearerLocalConfig, Secret,
};
