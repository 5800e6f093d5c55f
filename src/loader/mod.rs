//! Config loader module
//!
//! Read authenticator config lists from YAML or JSON files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `load_auth_config` - Load from a file, format picked by extension
//! - `load_auth_config_from_str` - Load from an in-memory string
//!
//! A file holds either the bare list of entries or an object with an
//! `authenticators` key holding that list.

mod parser;

pub use parser::{load_auth_config, load_auth_config_from_str, ConfigFormat};
