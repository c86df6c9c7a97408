//! Process-local backend.
//!
//! Secrets live only as long as the backend. Each (service, user) key holds
//! a list so that duplicates, which some platform stores accumulate through
//! external tools, can be reproduced.

use std::collections::HashMap;

use parking_lot::RwLock;
use zeroize::Zeroizing;

use crate::backend::SecretBackend;
use crate::error::Result;

type Key = (String, String);

/// In-memory [`SecretBackend`]. Stored bytes are wiped when replaced,
/// deleted, or when the backend is dropped.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<Key, Vec<Zeroizing<Vec<u8>>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret next to any existing ones for the same key, bypassing
    /// the replace-on-store rule.
    pub fn insert_duplicate(&self, service: &str, user: &str, secret: &[u8]) {
        self.entries
            .write()
            .entry(key(service, user))
            .or_default()
            .push(Zeroizing::new(secret.to_vec()));
    }

    /// Number of secrets held for the key.
    pub fn count(&self, service: &str, user: &str) -> usize {
        self.entries
            .read()
            .get(&key(service, user))
            .map_or(0, Vec::len)
    }
}

fn key(service: &str, user: &str) -> Key {
    (service.to_string(), user.to_string())
}

impl SecretBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn store(&self, service: &str, user: &str, secret: &[u8]) -> Result<()> {
        self.entries
            .write()
            .insert(key(service, user), vec![Zeroizing::new(secret.to_vec())]);
        Ok(())
    }

    fn retrieve(&self, service: &str, user: &str) -> Result<Option<Zeroizing<Vec<u8>>>> {
        Ok(self
            .entries
            .read()
            .get(&key(service, user))
            .and_then(|secrets| secrets.first())
            .map(|secret| Zeroizing::new(secret.to_vec())))
    }

    fn delete_all(&self, service: &str, user: &str) -> Result<usize> {
        Ok(self
            .entries
            .write()
            .remove(&key(service, user))
            .map_or(0, |secrets| secrets.len()))
    }
}
