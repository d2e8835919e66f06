//! Store trait: the abstract interface over the external document store.
//!
//! This trait allows the reactor to be store-agnostic. The production
//! deployment binds it to the hosted document database; tests use
//! [`crate::MemoryStore`].

use async_trait::async_trait;
use handup_core::{Post, PostId, User, UserId};

use crate::error::Result;

/// A user-document update closure for [`Store::modify_user`].
///
/// Receives the current document (`None` when absent) and returns the
/// document to write back. The store may run the closure several times
/// when the transaction collides, so it must be free of side effects.
pub type UserUpdateFn<'a> = &'a (dyn Fn(Option<User>) -> User + Send + Sync);

/// The Store trait: async interface over the external document store.
///
/// # Design Notes
///
/// - **Point reads**: `get_*` return `Ok(None)` for absent documents.
///   Missing references are a steady state for this core, never a fault.
/// - **Serializable read-modify-write**: `modify_user` is scoped to a
///   single user document. Implementations must retry on conflict up
///   to a bounded budget, then fail with
///   [`crate::StoreError::TransactionExhausted`]. Two racing
///   modifications of the same user must both land, neither lost.
/// - **Idempotent field clear**: `clear_delivery_token` is a plain
///   single-field update; clearing an absent token or an absent user
///   is a no-op.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a user document by key.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Fetch a post document by key.
    async fn get_post(&self, id: &PostId) -> Result<Option<Post>>;

    /// Remove the user's stored delivery token, if any.
    async fn clear_delivery_token(&self, id: &UserId) -> Result<()>;

    /// Serializable read-modify-write of one user document.
    ///
    /// Reads the current document, applies `update`, and commits the
    /// result atomically with respect to every other `modify_user`
    /// call for the same key. An absent document is handed to the
    /// closure as `None` and created by the commit.
    async fn modify_user(&self, id: &UserId, update: UserUpdateFn<'_>) -> Result<()>;
}
