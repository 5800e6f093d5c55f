//! Authenticator registry
//!
//! Turns a list of authenticator config entries into authenticator
//! instances and registers them against a server.
//!
//! # Overview
//!
//! The manager module provides:
//! - `AuthManager` - Scheme and authenticator registry built from config
//! - A static dispatch table from config `type` tag to constructor

mod auth_manager;
mod dispatch;

pub use auth_manager::AuthManager;
pub use dispatch::{config_tag, lookup, Constructor, Dispatch};

#[cfg(test)]
mod manager_tests;
