//! Error types for socialfeed.

use thiserror::Error;

/// Common error type for socialfeed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Resource already exists (unique constraint).
    #[error("{0} already exists")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure (panicked blocking task, hashing failure).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for FeedError {
    fn from(e: sqlx::Error) -> Self {
        FeedError::Database(e.to_string())
    }
}

/// Result type alias for socialfeed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
