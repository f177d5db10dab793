//! Error types for page state and preferences.

use std::io;

use clusterview_seeker::SeekerError;

/// Errors from preference storage and page configuration.
///
/// Filtering, sorting and chip handling never fail; only I/O and
/// deserialization do.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Reading or writing the preference file failed.
    #[error("preference store I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A stored preference or file is not valid JSON.
    #[error("invalid preference JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A page configuration document could not be parsed.
    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The page's field registry could not be built.
    #[error("invalid field registry: {0}")]
    Registry(#[from] SeekerError),

    /// A thread panicked while holding the store lock.
    #[error("preference store lock poisoned")]
    StorePoisoned,
}

/// Result type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;
