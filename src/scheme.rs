//! Security scheme descriptors
//!
//! A scheme tells the server's authentication layer what shape of credential
//! to expect. Every built-in authenticator relies on the bearer scheme.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

/// Name of the well-known bearer scheme
pub const BEARER_SCHEME_NAME: &str = "bearer";

/// The bearer scheme shared by all authenticators, created once per process
pub static BEARER_SCHEME: Lazy<Arc<Scheme>> = Lazy::new(|| {
    Arc::new(Scheme {
        scheme_name: BEARER_SCHEME_NAME.to_string(),
        token_type: "Bearer".to_string(),
        header: "Authorization".to_string(),
    })
});

/// Named security scheme descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scheme {
    /// Unique scheme name
    pub scheme_name: String,
    /// Credential prefix in the header value (e.g., "Bearer")
    pub token_type: String,
    /// Header that carries the credential
    pub header: String,
}

impl Scheme {
    /// Create a scheme reading credentials from the `Authorization` header
    pub fn new(scheme_name: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            scheme_name: scheme_name.into(),
            token_type: token_type.into(),
            header: "Authorization".to_string(),
        }
    }
}

/// Shared handle to the bearer scheme
pub fn bearer_scheme() -> Arc<Scheme> {
    Arc::clone(&BEARER_SCHEME)
}
