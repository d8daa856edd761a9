//! WordPets Error Types
//!
//! Centralized error handling for the tutor engine.

use thiserror::Error;

/// Central error type for WordPets
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Curriculum error: {0}")]
    Curriculum(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for WordPets operations
pub type TutorResult<T> = Result<T, TutorError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for TutorError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        TutorError::Lock(err.to_string())
    }
}
