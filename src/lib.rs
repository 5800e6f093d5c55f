//! # authwire
//!
//! A config-driven registry that wires authenticator strategies and the
//! security schemes they rely on into a server's authentication subsystem
//! at startup.
//!
//! ## Features
//!
//! - **Four Authenticator Types**: OAuth2 bearer (remote), Basic token,
//!   OAuth2 bearer (local JWT), and local JWT combined with Basic token
//! - **Tag Dispatch**: Config entries are routed by their `type` tag
//! - **Shared Bearer Scheme**: Registered once no matter how many
//!   authenticators rely on it
//! - **YAML/JSON Config**: Load authenticator lists from files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use authwire::{AuthManager, AuthServer, StrategyTable, Result};
//!
//! fn main() -> Result<()> {
//!     let manager = AuthManager::from_file("config/auth.yaml")?;
//!
//!     let mut server = StrategyTable::new();
//!     for scheme in manager.schemes() {
//!         server.register_scheme(scheme)?;
//!     }
//!     manager.register(&mut server)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! config entries ──► AuthManager ──dispatch by type──► Authenticator (x4)
//!                        │                                  │
//!                        └── schemes (bearer) ──────────────┤
//!                                                           ▼
//!                                         AuthServer (register_strategy)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Security scheme descriptors
pub mod scheme;

/// Server-side registration target
pub mod server;

/// Authenticator implementations
pub mod auth;

/// Authenticator registry
pub mod manager;

/// Config file loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::Authenticator;
pub use loader::{load_auth_config, load_auth_config_from_str, ConfigFormat};
pub use manager::AuthManager;
pub use scheme::{bearer_scheme, Scheme, BEARER_SCHEME};
pub use server::{AuthServer, Strategy, StrategyTable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
