//! Domain-level errors.
//!
//! These errors represent failures of the credential codec and domain rules.
//! They are independent of infrastructure concerns (HTTP, gRPC, database).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// The password could not be hashed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The OS random source kept failing
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        DomainError::Hashing(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
