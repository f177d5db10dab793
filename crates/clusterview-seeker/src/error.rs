//! Error types for the seeker crate.
//!
//! Query evaluation never fails. Errors only arise while building a
//! [`FieldRegistry`](crate::FieldRegistry).

use thiserror::Error;

/// Errors that can occur when building a field registry.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// The clause pattern compiled from the registered field names is invalid.
    #[error("invalid clause pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Two fields share a (case-insensitive) name.
    #[error("field '{0}' is registered more than once")]
    DuplicateField(String),

    /// The primary field named on the builder was never registered.
    #[error("primary field '{0}' is not registered")]
    UnknownPrimaryField(String),

    /// A registry needs at least one field.
    #[error("registry has no fields")]
    EmptyRegistry,
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
