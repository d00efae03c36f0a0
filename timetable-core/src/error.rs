//! Error types for the timetable crates.

use thiserror::Error;

/// Errors that can occur in timetable operations.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable")]
    StorageUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
