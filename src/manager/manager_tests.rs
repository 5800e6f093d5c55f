//! Tests for AuthManager

use super::*;
use crate::auth::{Authenticator, BasicAuthenticator, OAuthBearerAuthenticator};
use crate::error::{Error, Result};
use crate::scheme::{bearer_scheme, Scheme};
use crate::server::{AuthServer, Strategy, StrategyTable};
use crate::types::AuthenticatorKind;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn basic_config() -> Value {
    json!({
        "type": "basic_token",
        "clients": [{"client_id": "web", "client_secret": "w-secret"}]
    })
}

fn remote_config() -> Value {
    json!({
        "type": "oauth_bearer_token",
        "url": "https://auth.example.com/oauth/introspect"
    })
}

fn local_config() -> Value {
    json!({"type": "oauth_bearer_local", "secret": "jwt-secret"})
}

fn local_and_basic_config() -> Value {
    json!({
        "type": "oauth_bearer_local_and_basic",
        "secret": "jwt-secret",
        "clients": [{"client_id": "cron", "client_secret": "c-secret"}]
    })
}

fn kinds(manager: &AuthManager) -> Vec<AuthenticatorKind> {
    manager.authenticators().iter().map(|a| a.kind()).collect()
}

/// Authenticator that records the order of register calls
#[derive(Debug)]
struct Recording {
    name: &'static str,
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

impl Authenticator for Recording {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::BasicToken
    }

    fn strategy_name(&self) -> &str {
        self.name
    }

    fn strategy(&self) -> Strategy {
        Strategy::new(self.name, "bearer", self.kind())
    }

    fn register(&self, _server: &mut dyn AuthServer) -> Result<()> {
        self.calls.lock().unwrap().push(self.name);
        if self.fail {
            return Err(Error::Other(format!("{} failed", self.name)));
        }
        Ok(())
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_null_config_fails() {
    let err = AuthManager::new(&Value::Null).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().contains("Authenticator config is null"));
}

#[test]
fn test_non_array_config_fails() {
    for config in [
        json!({"type": "basic_token"}),
        json!("basic_token"),
        json!(42),
        json!(true),
    ] {
        let err = AuthManager::new(&config).unwrap_err();
        assert!(err.to_string().contains("must be an array"), "{config}");
    }
}

#[test]
fn test_empty_config() {
    let manager = AuthManager::new(&json!([])).unwrap();
    assert!(manager.is_empty());
    assert!(manager.schemes().is_empty());
    assert!(manager.get_authenticator(None).is_none());
}

#[test]
fn test_basic_and_remote() {
    let manager = AuthManager::new(&json!([basic_config(), remote_config()])).unwrap();

    assert_eq!(manager.authenticators().len(), 2);
    assert_eq!(manager.schemes().len(), 1);
    assert_eq!(
        manager
            .get_authenticator(Some("basic_token"))
            .unwrap()
            .kind(),
        AuthenticatorKind::BasicToken
    );
    assert_eq!(
        manager
            .get_authenticator(Some("oauth_bearer_token"))
            .unwrap()
            .kind(),
        AuthenticatorKind::OauthBearerToken
    );
}

#[test]
fn test_all_variants_share_one_scheme() {
    let manager = AuthManager::new(&json!([
        remote_config(),
        basic_config(),
        local_config(),
        local_and_basic_config()
    ]))
    .unwrap();

    assert_eq!(
        kinds(&manager),
        vec![
            AuthenticatorKind::OauthBearerToken,
            AuthenticatorKind::BasicToken,
            AuthenticatorKind::OauthBearerLocal,
            AuthenticatorKind::OauthBearerLocalAndBasic,
        ]
    );
    let schemes = manager.schemes();
    assert_eq!(schemes.len(), 1);
    assert!(Arc::ptr_eq(&schemes[0], &bearer_scheme()));
}

#[test]
fn test_strategy_schemes_are_tracked() {
    let manager = AuthManager::new(&json!([local_config(), basic_config()])).unwrap();

    for auth in manager.authenticators() {
        let tracked = manager.scheme(&auth.strategy().scheme).unwrap();
        assert!(Arc::ptr_eq(&tracked, &auth.scheme()));
    }
}

#[test]
fn test_duplicate_type_keeps_first() {
    let manager = AuthManager::new(&json!([
        {
            "type": "basic_token",
            "name": "first",
            "clients": [{"client_id": "a", "client_secret": "x"}]
        },
        {
            "type": "basic_token",
            "name": "second",
            "clients": [{"client_id": "b", "client_secret": "y"}]
        }
    ]))
    .unwrap();

    assert_eq!(manager.len(), 1);
    let auth = manager.get_authenticator(Some("basic_token")).unwrap();
    assert_eq!(auth.strategy_name(), "first");
}

#[test]
fn test_invalid_duplicate_still_fails() {
    let result = AuthManager::new(&json!([
        basic_config(),
        {"type": "basic_token", "clients": []}
    ]));
    assert!(matches!(
        result,
        Err(Error::AuthenticatorConfig {
            kind: AuthenticatorKind::BasicToken,
            ..
        })
    ));
}

#[test]
fn test_unknown_and_untyped_entries_ignored() {
    let manager = AuthManager::new(&json!([
        {"type": "api_key", "key": "X-Api-Key"},
        {"no_type": true},
        {"type": 12},
        "basic_token",
        42,
        basic_config()
    ]))
    .unwrap();

    assert_eq!(manager.authenticator_names().collect::<Vec<_>>(), ["basic_token"]);
    assert_eq!(manager.schemes().len(), 1);
}

#[test]
fn test_null_entry_fails() {
    let err = AuthManager::new(&json!([basic_config(), null, local_config()])).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid authenticator config: Authenticator config entry 1 is null"
    );
}

#[test]
fn test_only_unknown_entries_registers_no_scheme() {
    let manager = AuthManager::new(&json!([{"type": "session_token"}])).unwrap();
    assert!(manager.is_empty());
    assert!(manager.schemes().is_empty());
}

#[test]
fn test_variant_config_error_propagates() {
    let err = AuthManager::new(&json!([
        basic_config(),
        {"type": "oauth_bearer_token", "url": "::nope::"}
    ]))
    .unwrap_err();
    assert!(matches!(
        err,
        Error::AuthenticatorConfig {
            kind: AuthenticatorKind::OauthBearerToken,
            ..
        }
    ));
}

// ============================================================================
// Scheme Tests
// ============================================================================

#[test]
fn test_add_scheme_first_wins() {
    let mut manager = AuthManager::default();
    let first = Arc::new(Scheme::new("token", "Token"));
    let second = Arc::new(Scheme::new("token", "Other"));

    assert!(manager.add_scheme(Arc::clone(&first)));
    assert!(!manager.add_scheme(second));

    assert_eq!(manager.schemes().len(), 1);
    assert!(Arc::ptr_eq(&manager.scheme("token").unwrap(), &first));
}

#[test]
fn test_schemes_keep_insertion_order() {
    let mut manager = AuthManager::default();
    manager.add_scheme(Arc::new(Scheme::new("mac", "MAC")));
    manager.add_scheme(bearer_scheme());
    manager.add_scheme(Arc::new(Scheme::new("digest", "Digest")));

    let names: Vec<_> = manager
        .schemes()
        .iter()
        .map(|s| s.scheme_name.clone())
        .collect();
    assert_eq!(names, ["mac", "bearer", "digest"]);
}

// ============================================================================
// Authenticator Tests
// ============================================================================

#[test]
fn test_add_authenticator_first_wins() {
    let mut manager = AuthManager::default();
    let basic: Arc<dyn Authenticator> = Arc::new(BasicAuthenticator::new(&basic_config()).unwrap());
    let remote: Arc<dyn Authenticator> =
        Arc::new(OAuthBearerAuthenticator::new(&remote_config()).unwrap());

    assert!(manager.add_authenticator("api", Arc::clone(&basic)));
    assert!(!manager.add_authenticator("api", remote));

    let stored = manager.get_authenticator(Some("api")).unwrap();
    assert!(Arc::ptr_eq(&stored, &basic));
}

#[test]
fn test_get_authenticator_without_name() {
    let manager = AuthManager::new(&json!([local_config()])).unwrap();

    let any = manager.get_authenticator(None).unwrap();
    assert_eq!(any.kind(), AuthenticatorKind::OauthBearerLocal);

    let empty = manager.get_authenticator(Some("")).unwrap();
    assert!(Arc::ptr_eq(&any, &empty));
}

#[test]
fn test_get_missing_authenticator() {
    let manager = AuthManager::new(&json!([basic_config()])).unwrap();
    assert!(manager.get_authenticator(Some("oauth_bearer_local")).is_none());
}

// ============================================================================
// Register Tests
// ============================================================================

#[test]
fn test_register_delegates_in_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut manager = AuthManager::default();
    for name in ["one", "two", "three"] {
        manager.add_authenticator(
            name,
            Arc::new(Recording {
                name,
                calls: Arc::clone(&calls),
                fail: false,
            }),
        );
    }

    manager.register(&mut StrategyTable::new()).unwrap();
    assert_eq!(*calls.lock().unwrap(), ["one", "two", "three"]);
}

#[test]
fn test_register_stops_at_first_failure() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut manager = AuthManager::default();
    for (name, fail) in [("one", false), ("two", true), ("three", false)] {
        manager.add_authenticator(
            name,
            Arc::new(Recording {
                name,
                calls: Arc::clone(&calls),
                fail,
            }),
        );
    }

    let err = manager.register(&mut StrategyTable::new()).unwrap_err();
    assert_eq!(err.to_string(), "two failed");
    assert_eq!(*calls.lock().unwrap(), ["one", "two"]);
}

#[test]
fn test_register_into_strategy_table() {
    let manager = AuthManager::new(&json!([basic_config(), local_config()])).unwrap();
    let mut table = StrategyTable::new();
    for scheme in manager.schemes() {
        table.register_scheme(scheme).unwrap();
    }

    manager.register(&mut table).unwrap();

    let names: Vec<_> = table.strategies().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["basic_token", "oauth_bearer_local"]);
    assert!(table.strategies().iter().all(|s| s.scheme == "bearer"));
}

#[test]
fn test_register_surfaces_server_errors() {
    let manager = AuthManager::new(&json!([basic_config()])).unwrap();

    // Schemes were never registered with the table.
    let err = manager.register(&mut StrategyTable::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownScheme { .. }));
}

#[test]
fn test_register_duplicate_strategy_name() {
    let manager = AuthManager::new(&json!([
        {"type": "oauth_bearer_local", "name": "api", "secret": "s"},
        {
            "type": "basic_token",
            "name": "api",
            "clients": [{"client_id": "web", "client_secret": "x"}]
        }
    ]))
    .unwrap();
    assert_eq!(manager.len(), 2);

    let mut table = StrategyTable::new();
    table.register_scheme(bearer_scheme()).unwrap();
    let err = manager.register(&mut table).unwrap_err();
    assert!(matches!(err, Error::DuplicateStrategy { name } if name == "api"));
    assert_eq!(table.strategies().len(), 1);
}

#[test]
fn test_from_yaml_str() {
    let manager = AuthManager::from_yaml_str(
        r#"
- type: oauth_bearer_token
  url: https://auth.example.com/introspect
- type: basic_token
  clients:
    - client_id: web
      client_secret: w-secret
"#,
    )
    .unwrap();

    assert_eq!(
        kinds(&manager),
        vec![
            AuthenticatorKind::OauthBearerToken,
            AuthenticatorKind::BasicToken
        ]
    );
}
