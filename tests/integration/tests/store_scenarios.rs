//! Save/load/delete scenarios against the in-memory backend.

use keyward_integration_tests::{memory_store, PASSWORD, SERVICE, USER};
use keyward_secrets::SecretValue;

#[test]
fn test_save_load_delete_lifecycle() {
    let (store, backend) = memory_store();
    let secret = SecretValue::new(&PASSWORD);

    assert!(store.save(SERVICE, USER, &secret));
    assert_eq!(backend.count(SERVICE, USER), 1);

    let loaded = store.load(SERVICE, USER);
    assert!(loaded.is_ok());
    assert_eq!(loaded.size(), 4);
    assert_eq!(loaded.data(), Some(&PASSWORD[..]));
    assert_eq!(loaded, secret);

    assert!(store.delete(SERVICE, USER));
    assert!(!store.load(SERVICE, USER).is_ok());
    assert!(!store.delete(SERVICE, USER));
}

#[test]
fn test_overwrite_keeps_single_entry() {
    let (store, backend) = memory_store();

    assert!(store.save(SERVICE, USER, &SecretValue::new(b"first")));
    assert!(store.save(SERVICE, USER, &SecretValue::new(b"second")));

    assert_eq!(backend.count(SERVICE, USER), 1);
    assert_eq!(store.load(SERVICE, USER).as_str(), Some("second"));
}

#[test]
fn test_pairs_are_independent() {
    let (store, _backend) = memory_store();

    assert!(store.save(SERVICE, USER, &SecretValue::new(b"alice-secret")));
    assert!(store.save(SERVICE, "bob", &SecretValue::new(b"bob-secret")));
    assert!(store.save("OtherApp", USER, &SecretValue::new(b"other-secret")));

    assert!(store.delete(SERVICE, USER));

    assert!(!store.load(SERVICE, USER).is_ok());
    assert_eq!(store.load(SERVICE, "bob").as_str(), Some("bob-secret"));
    assert_eq!(store.load("OtherApp", USER).as_str(), Some("other-secret"));
}

#[test]
fn test_delete_removes_every_duplicate() {
    let (store, backend) = memory_store();
    backend.insert_duplicate(SERVICE, USER, b"one");
    backend.insert_duplicate(SERVICE, USER, b"two");

    assert!(store.delete(SERVICE, USER));
    assert_eq!(backend.count(SERVICE, USER), 0);
}

#[test]
fn test_zero_length_secret_is_present() {
    let (store, _backend) = memory_store();

    assert!(store.save(SERVICE, USER, &SecretValue::new(&[])));

    let loaded = store.load(SERVICE, USER);
    assert!(loaded.is_ok());
    assert_eq!(loaded.size(), 0);
}

#[test]
fn test_loaded_value_outlives_store() {
    let loaded = {
        let (store, _backend) = memory_store();
        assert!(store.save(SERVICE, USER, &SecretValue::new(&PASSWORD)));
        store.load(SERVICE, USER)
    };
    assert_eq!(loaded.data(), Some(&PASSWORD[..]));
}
