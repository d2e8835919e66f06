//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Absence of a document is not an error; point reads return
/// `Ok(None)`. These variants are infrastructure faults.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A serializable read-modify-write kept colliding and ran out of
    /// its retry budget.
    #[error("transaction gave up after {attempts} contended attempts")]
    TransactionExhausted { attempts: u32 },

    /// The backing store rejected or failed the request.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The store connection or change feed was shut down.
    #[error("store closed")]
    Closed,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
