//! # Handup Store
//!
//! Document-store abstraction for the Handup reactor. Provides a
//! trait-based interface over the external transactional document
//! store, plus an in-memory implementation for tests.
//!
//! ## Overview
//!
//! The reactor never talks to a concrete database. It reads and writes
//! through the [`Store`] trait and observes changes through the
//! [`ChangeFeed`] trait. [`MemoryStore`] implements both ends with the
//! same semantics the external store guarantees: point reads,
//! idempotent single-field updates, and a serializable single-document
//! read-modify-write that retries on contention.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for document access
//! - [`ChangeFeed`] - Subscription to typed change events
//! - [`MemoryStore`] - In-memory store with optimistic transactions
//!
//! ## Design Notes
//!
//! - **Absence is a value**: point reads return `Ok(None)` for missing
//!   documents; only infrastructure faults are errors.
//! - **Bounded transactions**: `modify_user` reruns its closure on
//!   contention and gives up with [`StoreError::TransactionExhausted`]
//!   after the configured retry budget.
//! - **Token clearing needs no transaction**: it is a single-field,
//!   idempotent, self-commuting update.

pub mod error;
pub mod feed;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use feed::ChangeFeed;
pub use memory::{MemoryFeed, MemoryStore, MemoryStoreConfig};
pub use traits::{Store, UserUpdateFn};
