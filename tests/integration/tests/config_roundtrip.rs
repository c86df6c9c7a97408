//! Config save/load roundtrip integration tests.

use keyward_core::config::{LogFormat, LogLevel};
use keyward_core::{BackendKind, Config, StoreConfig};
use keyward_integration_tests::{PASSWORD, SERVICE, USER};
use keyward_secrets::{SecretStore, SecretValue};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keyward.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keyward.json5");

    let mut config = Config::default();
    config.store.backend = BackendKind::Memory;
    config.store.probe_on_open = false;
    config.logging.level = LogLevel::Trace;
    config.logging.format = LogFormat::Json;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.store.backend, BackendKind::Memory);
    assert!(!loaded.store.probe_on_open);
    assert_eq!(loaded.logging.level, LogLevel::Trace);
    assert_eq!(loaded.logging.format, LogFormat::Json);
}

#[test]
fn test_loaded_config_opens_store() {
    let config = Config::parse(r#"{ store: { backend: "memory" } }"#).unwrap();

    let store = SecretStore::open(&config.store);
    assert_eq!(store.backend_name(), Some("memory"));
    assert!(store.save(SERVICE, USER, &SecretValue::new(&PASSWORD)));
    assert_eq!(store.load(SERVICE, USER).data(), Some(&PASSWORD[..]));
}

#[test]
fn test_memory_stores_are_isolated() {
    let config = StoreConfig {
        backend: BackendKind::Memory,
        ..Default::default()
    };

    let first = SecretStore::open(&config);
    let second = SecretStore::open(&config);
    assert!(first.save(SERVICE, USER, &SecretValue::new(&PASSWORD)));
    assert!(!second.load(SERVICE, USER).is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/keyward.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
