//! Error types for the chain boundary.

use thiserror::Error;

/// Result type alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can cross the chain boundary.
///
/// A provider failure is not classified further here: the caller cannot tell
/// a network fault from a contract revert apart, and retry policy is the
/// caller's decision.
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    /// The underlying provider failed (network, node, revert).
    #[error("Provider error: {0}")]
    Provider(String),

    /// A raw record from the provider failed boundary validation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The provider has no answer for the requested entity.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ChainError {
    /// Create a provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an invalid-record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
