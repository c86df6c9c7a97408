//! Error types for secret backends.

use thiserror::Error;

/// Errors reported by a [`SecretBackend`](crate::SecretBackend).
///
/// A missing secret is not an error: backends report it as `Ok(None)` or
/// `Ok(0)`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The credential facility could not be reached or initialized.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The facility refused access, e.g. a locked collection.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The facility rejected the service, user, or secret.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any other platform-reported failure.
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Convenience result alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
