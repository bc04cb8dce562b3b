//! Error types for forma-core.
//!
//! The engine itself never fails: the Validator reports data-quality
//! findings as plain strings and the Derivation Engine degrades to a blank
//! value. `FormaError` exists for the surrounding surfaces: schema
//! serialization, digesting, and argument checks in helper APIs.

use thiserror::Error;

/// Result alias used across forma-core.
pub type FormaResult<T> = Result<T, FormaError>;

/// Error type for forma-core operations.
#[derive(Debug, Error)]
pub enum FormaError {
    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant did not hold.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl FormaError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        FormaError::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        FormaError::Invariant(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        FormaError::Serialization(msg.into())
    }
}
