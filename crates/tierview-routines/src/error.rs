//! Error types for routine persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("A routine named '{name}' already exists for view '{view_id}'")]
    DuplicateName { view_id: String, name: String },

    #[error("No routine is active for this view")]
    NoActiveRoutine,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type Result<T> = std::result::Result<T, RoutineError>;
