//! Error types for caldroid.

use thiserror::Error;

/// Errors that can occur in caldroid operations.
#[derive(Error, Debug)]
pub enum CaldroidError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for caldroid operations.
pub type CaldroidResult<T> = Result<T, CaldroidError>;
