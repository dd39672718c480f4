//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The requested resource (question, location) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input was missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A codeword or credential was rejected.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The key-value store or another backing service failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
