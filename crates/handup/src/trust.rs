//! Trust awards: the at-most-once reputation increment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handup_core::{PostId, User, UserId};
use handup_store::{Store, StoreError};
use tracing::{debug, info};

/// Applies reputation rewards through the store's serializable
/// single-document transaction.
pub struct TrustLedger<S> {
    store: Arc<S>,
}

impl<S: Store> TrustLedger<S> {
    /// Create a ledger over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Award one trust point to `user_id` for completing `post_id`.
    ///
    /// Runs a single read-modify-write: reads the current score (absent
    /// document or field is 0) and writes back `+1`. The user document's
    /// awarded-posts ledger is checked and extended in the same
    /// transaction, so a redelivered completion event for the same post
    /// is a no-op while concurrent awards for different posts all land.
    ///
    /// Returns whether a point was actually granted. A store that
    /// cannot commit within its retry budget fails the whole handler
    /// invocation; losing a reward silently would be a correctness
    /// violation.
    pub async fn award(&self, user_id: &UserId, post_id: &PostId) -> Result<bool, StoreError> {
        // The closure may rerun on contention; the flag ends up with
        // the outcome of the run that committed.
        let granted = AtomicBool::new(false);

        self.store
            .modify_user(user_id, &|user| {
                let mut user = user.unwrap_or_else(|| User::new(user_id.clone()));
                if user.awarded_posts.insert(post_id.clone()) {
                    user.trust_score += 1;
                    granted.store(true, Ordering::Relaxed);
                } else {
                    granted.store(false, Ordering::Relaxed);
                }
                user
            })
            .await?;

        let granted = granted.load(Ordering::Relaxed);
        if granted {
            info!(user = %user_id, post = %post_id, "trust point awarded");
        } else {
            debug!(user = %user_id, post = %post_id, "trust point already awarded for this post");
        }
        Ok(granted)
    }
}
