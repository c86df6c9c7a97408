//! Secret Service (Linux, BSD) and Windows Credential Manager adapter.
//!
//! Built on the `keyring` crate. On Secret Service platforms items go to
//! the default collection; several items can match one (service, user) pair
//! when other tools created them, which `keyring` reports as
//! [`keyring::Error::Ambiguous`].

use keyring::{Entry, Error as KeyringError};
use tracing::debug;
use zeroize::Zeroizing;

use crate::backend::SecretBackend;
use crate::error::{BackendError, Result};

/// Key looked up while opening the backend to check that it answers.
const PROBE_SERVICE: &str = "keyward";
const PROBE_USER: &str = "keyward-probe";

/// [`SecretBackend`] over the platform credential store.
pub struct KeyringBackend {
    _private: (),
}

impl KeyringBackend {
    /// Open the backend. With `probe`, one lookup is made so that an
    /// unreachable service (no D-Bus session, no keyring daemon) fails here.
    pub fn open(probe: bool) -> Result<Self> {
        if probe {
            let entry = Entry::new(PROBE_SERVICE, PROBE_USER).map_err(map_error)?;
            match entry.get_secret() {
                Ok(_) | Err(KeyringError::NoEntry) | Err(KeyringError::Ambiguous(_)) => {
                    debug!("platform credential store answered probe");
                }
                Err(e) => return Err(BackendError::Unavailable(e.to_string())),
            }
        }
        Ok(Self { _private: () })
    }

    fn entry(service: &str, user: &str) -> Result<Entry> {
        Entry::new(service, user).map_err(map_error)
    }
}

fn map_error(err: KeyringError) -> BackendError {
    match err {
        KeyringError::NoStorageAccess(e) => BackendError::AccessDenied(e.to_string()),
        KeyringError::PlatformFailure(e) => BackendError::Platform(e.to_string()),
        KeyringError::TooLong(attr, max) => {
            BackendError::InvalidInput(format!("{attr} is longer than {max}"))
        }
        KeyringError::Invalid(attr, reason) => {
            BackendError::InvalidInput(format!("{attr}: {reason}"))
        }
        other => BackendError::Platform(other.to_string()),
    }
}

impl SecretBackend for KeyringBackend {
    fn name(&self) -> &'static str {
        "keyring"
    }

    fn store(&self, service: &str, user: &str, secret: &[u8]) -> Result<()> {
        let entry = Self::entry(service, user)?;
        match entry.set_secret(secret) {
            Ok(()) => Ok(()),
            Err(KeyringError::Ambiguous(existing)) => {
                // Exactly one item may remain for the key afterwards.
                debug!(count = existing.len(), "replacing duplicate credentials");
                for credential in &existing {
                    match credential.delete_credential() {
                        Ok(()) | Err(KeyringError::NoEntry) => {}
                        Err(e) => return Err(map_error(e)),
                    }
                }
                entry.set_secret(secret).map_err(map_error)
            }
            Err(e) => Err(map_error(e)),
        }
    }

    fn retrieve(&self, service: &str, user: &str) -> Result<Option<Zeroizing<Vec<u8>>>> {
        let entry = Self::entry(service, user)?;
        match entry.get_secret() {
            Ok(secret) => Ok(Some(Zeroizing::new(secret))),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(KeyringError::Ambiguous(matches)) => match matches.first() {
                Some(credential) => match credential.get_secret() {
                    Ok(secret) => Ok(Some(Zeroizing::new(secret))),
                    Err(KeyringError::NoEntry) => Ok(None),
                    Err(e) => Err(map_error(e)),
                },
                None => Ok(None),
            },
            Err(e) => Err(map_error(e)),
        }
    }

    fn delete_all(&self, service: &str, user: &str) -> Result<usize> {
        let entry = Self::entry(service, user)?;
        match entry.delete_credential() {
            Ok(()) => Ok(1),
            Err(KeyringError::NoEntry) => Ok(0),
            Err(KeyringError::Ambiguous(matches)) => {
                let mut deleted = 0;
                for credential in &matches {
                    match credential.delete_credential() {
                        Ok(()) => deleted += 1,
                        Err(KeyringError::NoEntry) => {}
                        Err(e) => return Err(map_error(e)),
                    }
                }
                Ok(deleted)
            }
            Err(e) => Err(map_error(e)),
        }
    }
}
