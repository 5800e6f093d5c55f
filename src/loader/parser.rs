//! Config file parser
//!
//! Parses authenticator config files into the JSON value `AuthManager`
//! consumes. Shape checks on the list itself are left to the manager.

use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use std::fs;
use std::path::Path;

/// Key holding the entry list when a file wraps it in an object
const AUTHENTICATORS_KEY: &str = "authenticators";

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (also accepts JSON, which is valid YAML)
    Yaml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Load an authenticator config list from a file
///
/// # Examples
///
/// ```ignore
/// let configs = load_auth_config("config/auth.yaml")?;
/// let manager = AuthManager::new(&configs)?;
/// ```
pub fn load_auth_config(path: impl AsRef<Path>) -> Result<JsonValue> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    load_auth_config_from_str(&content, ConfigFormat::from_path(path))
        .with_context(|| format!("Failed to load auth config '{}'", path.display()))
}

/// Load an authenticator config list from a string
pub fn load_auth_config_from_str(content: &str, format: ConfigFormat) -> Result<JsonValue> {
    let value: JsonValue = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };

    Ok(unwrap_entries(value))
}

/// Pull the entry list out of a wrapping object, if there is one
fn unwrap_entries(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(mut map) if map.contains_key(AUTHENTICATORS_KEY) => map
            .remove(AUTHENTICATORS_KEY)
            .unwrap_or(JsonValue::Null),
        other => other,
    }
}
