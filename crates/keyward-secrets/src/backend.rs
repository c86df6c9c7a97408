//! The backend capability a [`SecretStore`](crate::SecretStore) delegates to.

use std::sync::Arc;

use keyward_core::{BackendKind, StoreConfig};
use zeroize::Zeroizing;

use crate::error::Result;
use crate::memory::MemoryBackend;

/// A platform facility that persists secrets keyed by (service, user).
///
/// Implementations block until the facility answers. A missing secret is
/// never an error: `retrieve` returns `Ok(None)` and `delete_all` returns
/// `Ok(0)`.
pub trait SecretBackend: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Store `secret`, replacing every existing secret for the same key.
    fn store(&self, service: &str, user: &str, secret: &[u8]) -> Result<()>;

    /// Fetch one secret for the key. Which one is unspecified when the
    /// facility holds several.
    fn retrieve(&self, service: &str, user: &str) -> Result<Option<Zeroizing<Vec<u8>>>>;

    /// Remove every secret for the key, returning how many were removed.
    fn delete_all(&self, service: &str, user: &str) -> Result<usize>;
}

/// Create and initialize the backend selected by `config`.
pub fn open_backend(config: &StoreConfig) -> Result<Arc<dyn SecretBackend>> {
    match config.backend {
        BackendKind::Memory => Ok(Arc::new(MemoryBackend::new())),
        BackendKind::Native => native_backend(config.probe_on_open),
    }
}

#[cfg(target_os = "macos")]
fn native_backend(_probe: bool) -> Result<Arc<dyn SecretBackend>> {
    Ok(Arc::new(crate::keychain::KeychainBackend::open()?))
}

#[cfg(not(target_os = "macos"))]
fn native_backend(probe: bool) -> Result<Arc<dyn SecretBackend>> {
    Ok(Arc::new(crate::keyring_store::KeyringBackend::open(probe)?))
}
