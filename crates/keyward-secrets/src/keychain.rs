//! macOS Keychain adapter.
//!
//! Secrets are stored as generic passwords in the user's default keychain,
//! with the service as `kSecAttrService` and the user as `kSecAttrAccount`.

use security_framework::base::Error as SecurityError;
use security_framework::passwords::{
    delete_generic_password, get_generic_password, set_generic_password,
};
use tracing::warn;
use zeroize::Zeroizing;

use crate::backend::SecretBackend;
use crate::error::{BackendError, Result};

/// errSecItemNotFound
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;
/// errSecAuthFailed
const ERR_SEC_AUTH_FAILED: i32 = -25293;
/// errSecInteractionNotAllowed
const ERR_SEC_INTERACTION_NOT_ALLOWED: i32 = -25308;
/// userCanceledErr
const ERR_USER_CANCELED: i32 = -128;

/// Upper bound on delete calls for one key. Each call removes one item.
const MAX_DELETE_ROUNDS: usize = 64;

/// [`SecretBackend`] over the default macOS keychain.
pub struct KeychainBackend;

impl KeychainBackend {
    /// The default keychain is always reachable for a logged-in user.
    pub fn open() -> Result<Self> {
        Ok(Self)
    }
}

fn is_not_found(err: &SecurityError) -> bool {
    err.code() == ERR_SEC_ITEM_NOT_FOUND
}

fn map_error(action: &str, err: SecurityError) -> BackendError {
    let msg = format!("keychain {action} failed: {err}");
    match err.code() {
        ERR_SEC_AUTH_FAILED | ERR_SEC_INTERACTION_NOT_ALLOWED | ERR_USER_CANCELED => {
            BackendError::AccessDenied(msg)
        }
        _ => BackendError::Platform(msg),
    }
}

/// Call `delete_one` until it reports no match, counting deletions.
///
/// Matches left over after [`MAX_DELETE_ROUNDS`] deletions are an error.
fn delete_until_missing(mut delete_one: impl FnMut() -> Result<bool>) -> Result<usize> {
    let mut deleted = 0;
    while deleted < MAX_DELETE_ROUNDS {
        if !delete_one()? {
            return Ok(deleted);
        }
        deleted += 1;
    }

    if delete_one()? {
        warn!(deleted = deleted + 1, "keychain still holds matching items");
        return Err(BackendError::Platform(format!(
            "keychain still holds matching items after {} deletions",
            deleted + 1
        )));
    }
    Ok(deleted)
}

impl SecretBackend for KeychainBackend {
    fn name(&self) -> &'static str {
        "keychain"
    }

    fn store(&self, service: &str, user: &str, secret: &[u8]) -> Result<()> {
        // Updates the existing item in place when one matches.
        set_generic_password(service, user, secret).map_err(|e| map_error("write", e))
    }

    fn retrieve(&self, service: &str, user: &str) -> Result<Option<Zeroizing<Vec<u8>>>> {
        match get_generic_password(service, user) {
            Ok(data) => Ok(Some(Zeroizing::new(data))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(map_error("read", e)),
        }
    }

    fn delete_all(&self, service: &str, user: &str) -> Result<usize> {
        delete_until_missing(|| match delete_generic_password(service, user) {
            Ok(()) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(map_error("delete", e)),
        })
    }
}
