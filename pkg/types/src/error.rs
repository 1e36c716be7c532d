//! Error types for the capacity engine.
//!
//! The engine has no runtime failure modes of its own: upstream lookup
//! failures are replaced with defaults by the caller. What remains is a
//! caller-contract violation, surfaced verbatim and never retried.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// No quota snapshot was supplied, or it cannot be used.
    #[error("invalid quota: {0}")]
    InvalidQuota(String),

    /// Missing identifiers, a non-positive replica target, or an incomplete custom profile.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CapacityError>;
