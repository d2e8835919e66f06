//! Error types for the reactor.

use handup_store::StoreError;
use thiserror::Error;

/// Errors that can fail a handler invocation.
///
/// Only store access faults reach here. Notification-delivery failures
/// are handled inside the dispatcher and never fail the owning event.
#[derive(Debug, Error)]
pub enum ReactorError {
    /// Storage error, including an exhausted trust-award transaction.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for reactor operations.
pub type Result<T> = std::result::Result<T, ReactorError>;
