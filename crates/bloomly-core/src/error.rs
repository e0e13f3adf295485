//! Error types for the storage boundary and question-bank validation.
//!
//! Scoring itself is infallible: a pass always produces a complete
//! five-trait record, whatever the input looks like.

use thiserror::Error;

/// Errors from a key-value store backend.
///
/// Callers in the session layer treat a failed read as "no stored value"
/// and a failed write as a logged no-op; nothing here is fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Inconsistencies in a question bank or weight table.
#[derive(Debug, Error)]
pub enum BankError {
    /// An explicit effect names an option the question does not have.
    #[error("question `{id}`: effect option `{option}` is not in the options list")]
    UnknownEffectOption { id: String, option: String },

    /// Weight-table weights must be non-negative.
    #[error("question `{id}`: negative weight {weight} for trait `{trait_name}`")]
    NegativeWeight {
        id: String,
        trait_name: &'static str,
        weight: f64,
    },
}
