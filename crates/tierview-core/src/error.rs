//! Error types for tierview

use thiserror::Error;

/// Core error type for tierview operations
///
/// The engine functions themselves are total and never produce this type;
/// it covers the configuration and file plumbing around them.
#[derive(Error, Debug)]
pub enum TierviewError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown filter definition: {0}")]
    UnknownFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tierview operations
pub type Result<T> = std::result::Result<T, TierviewError>;
