//! Shared fixtures for the Keyward integration tests.

use std::sync::Arc;

use keyward_secrets::{MemoryBackend, SecretStore};

/// Service name used throughout the scenarios.
pub const SERVICE: &str = "MyApp";

/// User name used throughout the scenarios.
pub const USER: &str = "alice";

/// The bytes of "p@ss".
pub const PASSWORD: [u8; 4] = [0x70, 0x40, 0x73, 0x73];

/// A store over a fresh in-memory backend, plus the backend for inspection.
pub fn memory_store() -> (SecretStore, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = SecretStore::with_backend(backend.clone());
    (store, backend)
}
