//! Secret values that are wiped from memory once nothing refers to them.
//!
//! A [`SecretValue`] is immutable. Cloning it shares the underlying buffer;
//! the buffer is overwritten with zeroes when the last clone is dropped and
//! only then returned to the allocator.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::lock;

/// Heap buffer holding the secret bytes.
struct SecretBuf {
    bytes: Box<[u8]>,
    locked: bool,
}

impl SecretBuf {
    fn copy_from(data: &[u8]) -> Self {
        let mut bytes: Box<[u8]> = data.into();
        let locked = lock::lock(&mut bytes);
        Self { bytes, locked }
    }
}

impl Drop for SecretBuf {
    fn drop(&mut self) {
        SecretValue::wipe(&mut self.bytes);
        if self.locked {
            lock::unlock(&mut self.bytes);
        }
    }
}

/// An immutable secret, such as a password or token.
///
/// A default-constructed value is *absent*: it holds no buffer at all, which
/// is different from a present value of length zero (an empty password).
///
/// Equality compares bytes in constant time. Two absent values compare
/// equal; an absent value never equals a present one.
///
/// # Example
///
/// ```
/// use keyward_secrets::SecretValue;
///
/// let secret = SecretValue::new(b"p@ss");
/// assert!(secret.is_ok());
/// assert_eq!(secret.size(), 4);
/// assert_eq!(secret.data(), Some(&b"p@ss"[..]));
///
/// // Debug output is redacted
/// assert!(!format!("{:?}", secret).contains("p@ss"));
/// ```
#[derive(Clone, Default)]
pub struct SecretValue {
    inner: Option<Arc<SecretBuf>>,
}

impl SecretValue {
    /// The absent value, same as [`SecretValue::default`].
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Copy `data` into a new secret buffer.
    ///
    /// The result is present even when `data` is empty.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: Some(Arc::new(SecretBuf::copy_from(data))),
        }
    }

    /// Take a text secret, copying it into a secret buffer and wiping `text`.
    #[must_use]
    pub fn from_string(mut text: String) -> Self {
        let value = Self::new(text.as_bytes());
        Self::wipe_string(&mut text);
        value
    }

    /// Wrap bytes handed back by a backend. The backend's vector is wiped on
    /// return.
    pub(crate) fn from_backend(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self::new(&bytes)
    }

    /// Whether this value holds a buffer (possibly of length zero).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.inner.is_some()
    }

    /// Size of the secret in bytes, 0 for an absent value.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.as_ref().map_or(0, |buf| buf.bytes.len())
    }

    /// Read-only view of the secret, `None` for an absent value.
    ///
    /// The bytes are not NUL-terminated; use the slice length.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.inner.as_deref().map(|buf| &*buf.bytes)
    }

    /// The secret as UTF-8 text, `None` if absent or not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.data().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Overwrite caller-owned memory holding sensitive bytes.
    ///
    /// The writes are volatile and cannot be optimized away.
    pub fn wipe(data: &mut [u8]) {
        data.zeroize();
    }

    /// Overwrite and clear a caller-owned string, including spare capacity.
    pub fn wipe_string(text: &mut String) {
        text.zeroize();
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.bytes.len() == b.bytes.len() && bool::from(a.bytes.ct_eq(&b.bytes)))
            }
            _ => false,
        }
    }
}

impl Eq for SecretValue {}

impl From<&[u8]> for SecretValue {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl From<String> for SecretValue {
    fn from(text: String) -> Self {
        Self::from_string(text)
    }
}

// Never print secrets
impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(buf) => write!(f, "SecretValue([REDACTED, {} bytes])", buf.bytes.len()),
            None => f.write_str("SecretValue(absent)"),
        }
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
