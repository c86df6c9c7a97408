//! Secret storage for Keyward.
//!
//! Two pieces cooperate:
//!
//! - [`SecretValue`]: an immutable secret whose memory is wiped when the last
//!   reference to it is dropped
//! - [`SecretStore`]: a handle to the platform's credential store that saves,
//!   loads, and deletes secrets keyed by (service, user)
//!
//! The store delegates persistence to a [`SecretBackend`]: the macOS
//! Keychain, the Windows Credential Manager, or the Secret Service on Linux,
//! or an in-process [`MemoryBackend`].
//!
//! ```
//! use keyward_secrets::{MemoryBackend, SecretStore, SecretValue};
//! use std::sync::Arc;
//!
//! let store = SecretStore::with_backend(Arc::new(MemoryBackend::new()));
//! assert!(store.save("MyApp", "alice", &SecretValue::new(b"p@ss")));
//! assert_eq!(store.load("MyApp", "alice").data(), Some(&b"p@ss"[..]));
//! assert!(store.delete("MyApp", "alice"));
//! assert!(!store.load("MyApp", "alice").is_ok());
//! ```

pub mod backend;
pub mod error;
#[cfg(target_os = "macos")]
pub mod keychain;
#[cfg(not(target_os = "macos"))]
pub mod keyring_store;
mod lock;
pub mod memory;
pub mod store;
pub mod value;

#[cfg(test)]
mod test_support;

pub use backend::{open_backend, SecretBackend};
pub use error::{BackendError, Result};
pub use memory::MemoryBackend;
pub use store::{shutdown_default, SecretStore};
pub use value::SecretValue;
