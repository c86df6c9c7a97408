//! The secret store handle.
//!
//! A [`SecretStore`] maps a (service, user) pair to a [`SecretValue`] and
//! delegates persistence to a [`SecretBackend`]. Backend failures never
//! escape as errors: they are logged with `tracing::error!` and turned into
//! `false` or an absent value. A missing secret is not logged.
//!
//! The process-wide default backend is created on the first call to
//! [`SecretStore::get_default`] and kept until [`shutdown_default`] or
//! process exit. A failed initialization is not cached, so a later call
//! tries again. The backend is opened outside the slot's lock; when two
//! threads race, the first to publish wins and the other's backend is
//! dropped.

use std::fmt;
use std::sync::Arc;

use keyward_core::{Config, StoreConfig};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::backend::{open_backend, SecretBackend};
use crate::value::SecretValue;

static DEFAULT_BACKEND: Lazy<Mutex<Option<Arc<dyn SecretBackend>>>> =
    Lazy::new(|| Mutex::new(None));

/// Handle to a collection of secrets, sometimes called a key chain.
///
/// Clones refer to the same backend. A handle whose backend could not be
/// opened is invalid: [`is_ok`](Self::is_ok) returns `false` and every
/// operation logs an error and fails.
#[derive(Clone)]
pub struct SecretStore {
    backend: Option<Arc<dyn SecretBackend>>,
}

impl SecretStore {
    /// Return a store bound to the platform's default secret collection.
    ///
    /// `KEYWARD_BACKEND=memory` selects the in-memory backend instead. On
    /// failure an error is logged and an invalid store is returned.
    pub fn get_default() -> Self {
        if let Some(backend) = DEFAULT_BACKEND.lock().as_ref() {
            return Self::with_backend(Arc::clone(backend));
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        // Opened without holding the slot so a slow probe does not block
        // other callers or `shutdown_default`.
        let backend = match open_backend(&config.store) {
            Ok(backend) => backend,
            Err(e) => {
                error!(backend = %config.store.backend, "failed to open default secret store: {e}");
                return Self::invalid();
            }
        };

        let mut slot = DEFAULT_BACKEND.lock();
        match slot.as_ref() {
            // Another caller won the race; share its backend.
            Some(existing) => Self::with_backend(Arc::clone(existing)),
            None => {
                info!(backend = backend.name(), "opened default secret store");
                *slot = Some(Arc::clone(&backend));
                Self::with_backend(backend)
            }
        }
    }

    /// Open a store from explicit configuration, bypassing the default slot.
    pub fn open(config: &StoreConfig) -> Self {
        match open_backend(config) {
            Ok(backend) => {
                debug!(backend = backend.name(), "opened secret store");
                Self::with_backend(backend)
            }
            Err(e) => {
                error!(backend = %config.backend, "failed to open secret store: {e}");
                Self::invalid()
            }
        }
    }

    /// Build a store over an already opened backend.
    pub fn with_backend(backend: Arc<dyn SecretBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    fn invalid() -> Self {
        Self { backend: None }
    }

    /// Whether this store is bound to a backend.
    pub fn is_ok(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the backend this store delegates to.
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|backend| backend.name())
    }

    fn require_backend(&self, op: &str, service: &str, user: &str) -> Option<&dyn SecretBackend> {
        let backend = self.backend.as_deref();
        if backend.is_none() {
            error!(service, user, "cannot {op} secret: secret store is not available");
        }
        backend
    }

    /// Store `secret` under (service, user), replacing any existing secret
    /// for that pair.
    ///
    /// The service name should be human readable and unique to the
    /// application. Returns `false` after logging an error if the store is
    /// invalid, `secret` is absent, or the backend fails.
    pub fn save(&self, service: &str, user: &str, secret: &SecretValue) -> bool {
        let Some(backend) = self.require_backend("save", service, user) else {
            return false;
        };
        let Some(data) = secret.data() else {
            error!(service, user, "refusing to save an absent secret");
            return false;
        };

        match backend.store(service, user, data) {
            Ok(()) => {
                debug!(service, user, backend = backend.name(), "saved secret");
                true
            }
            Err(e) => {
                error!(service, user, backend = backend.name(), "failed to save secret: {e}");
                false
            }
        }
    }

    /// Look up the secret for (service, user).
    ///
    /// Returns an absent value without logging anything if there is no such
    /// secret. Backend failures also return an absent value but are logged.
    /// If several secrets match, which is only possible when something other
    /// than this API created them, an arbitrary one is returned.
    pub fn load(&self, service: &str, user: &str) -> SecretValue {
        let Some(backend) = self.require_backend("load", service, user) else {
            return SecretValue::absent();
        };

        match backend.retrieve(service, user) {
            Ok(Some(bytes)) => {
                debug!(service, user, backend = backend.name(), "loaded secret");
                SecretValue::from_backend(bytes)
            }
            Ok(None) => SecretValue::absent(),
            Err(e) => {
                error!(service, user, backend = backend.name(), "failed to load secret: {e}");
                SecretValue::absent()
            }
        }
    }

    /// Delete every secret stored for (service, user).
    ///
    /// Returns `true` if at least one secret was deleted. Returns `false` if
    /// none matched, or after logging an error if the backend failed.
    pub fn delete(&self, service: &str, user: &str) -> bool {
        let Some(backend) = self.require_backend("delete", service, user) else {
            return false;
        };

        match backend.delete_all(service, user) {
            Ok(0) => false,
            Ok(count) => {
                debug!(service, user, count, backend = backend.name(), "deleted secrets");
                true
            }
            Err(e) => {
                error!(service, user, backend = backend.name(), "failed to delete secret: {e}");
                false
            }
        }
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStore")
            .field("backend", &self.backend_name())
            .finish()
    }
}

/// Release the process-wide default backend.
///
/// Handles already returned by [`SecretStore::get_default`] keep working;
/// the next call opens a fresh backend.
pub fn shutdown_default() {
    if let Some(backend) = DEFAULT_BACKEND.lock().take() {
        debug!(backend = backend.name(), "released default secret store");
    }
}
