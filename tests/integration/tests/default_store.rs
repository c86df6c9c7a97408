//! Lifecycle of the process-wide default store.
//!
//! Kept in its own test binary with a single test: the default slot and
//! `KEYWARD_BACKEND` are process-global.

use keyward_integration_tests::{PASSWORD, SERVICE, USER};
use keyward_secrets::{shutdown_default, SecretStore, SecretValue};

#[test]
fn test_default_store_lifecycle() {
    std::env::set_var("KEYWARD_BACKEND", "memory");

    let store = SecretStore::get_default();
    assert!(store.is_ok());
    assert_eq!(store.backend_name(), Some("memory"));

    // Every handle shares one backend
    assert!(store.save(SERVICE, USER, &SecretValue::new(&PASSWORD)));
    let again = SecretStore::get_default();
    assert_eq!(again.load(SERVICE, USER).data(), Some(&PASSWORD[..]));

    // Existing handles survive shutdown
    shutdown_default();
    assert_eq!(store.load(SERVICE, USER).data(), Some(&PASSWORD[..]));

    // The next default is a fresh in-memory backend
    let fresh = SecretStore::get_default();
    assert!(fresh.is_ok());
    assert!(!fresh.load(SERVICE, USER).is_ok());

    // Racing first calls still converge on one backend
    shutdown_default();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let store = SecretStore::get_default();
                assert!(store.save(SERVICE, &format!("user-{i}"), &SecretValue::new(&[i as u8])));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let shared = SecretStore::get_default();
    for i in 0..8u8 {
        assert_eq!(shared.load(SERVICE, &format!("user-{i}")).data(), Some(&[i][..]));
    }

    shutdown_default();
}
