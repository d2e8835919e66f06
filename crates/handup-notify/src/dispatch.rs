//! The notification dispatcher: token lookup, send, and cleanup of
//! permanently invalid tokens.

use std::collections::BTreeMap;
use std::sync::Arc;

use handup_core::UserId;
use handup_store::{Store, StoreError};
use tracing::{debug, warn};

use crate::client::{PushClient, PushMessage};
use crate::error::ErrorCode;

/// What happened to one notification.
///
/// Delivery is best-effort: every non-success is a value here, never a
/// propagated error, so the owning event's other side effects cannot be
/// aborted by a delivery problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The provider accepted the notification.
    Sent,
    /// Nothing to deliver; an expected steady state.
    Skipped(SkipReason),
    /// The provider rejected the send with the given code.
    Failed(ErrorCode),
}

/// Why a dispatch was skipped without a send call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No user document under that key.
    UnknownUser,
    /// The user has no stored delivery token.
    NoDeliveryToken,
}

/// Dispatches notifications to users through an injected store and
/// push client.
pub struct Notifier<S, P> {
    store: Arc<S>,
    push: Arc<P>,
}

impl<S: Store, P: PushClient> Notifier<S, P> {
    /// Create a dispatcher over the given collaborators.
    pub fn new(store: Arc<S>, push: Arc<P>) -> Self {
        Self { store, push }
    }

    /// Resolve `user_id` to a delivery token and send one notification.
    ///
    /// Returns `Err` only for store access faults. Provider failures
    /// come back as [`DispatchOutcome::Failed`]; a permanently invalid
    /// token is additionally cleared from the user record.
    pub async fn notify(
        &self,
        user_id: &UserId,
        title: &str,
        body: &str,
        data: BTreeMap<String, String>,
    ) -> Result<DispatchOutcome, StoreError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            debug!(user = %user_id, "dispatch skipped: unknown user");
            return Ok(DispatchOutcome::Skipped(SkipReason::UnknownUser));
        };
        let Some(token) = user.delivery_token else {
            debug!(user = %user_id, "dispatch skipped: no delivery token");
            return Ok(DispatchOutcome::Skipped(SkipReason::NoDeliveryToken));
        };

        let message = PushMessage {
            token,
            title: title.to_owned(),
            body: body.to_owned(),
            data,
        };

        match self.push.send(&message).await {
            Ok(()) => Ok(DispatchOutcome::Sent),
            Err(err) => {
                warn!(user = %user_id, code = ?err.code, "push delivery failed: {err}");
                if err.code.invalidates_token() {
                    self.store.clear_delivery_token(user_id).await?;
                    debug!(user = %user_id, "cleared permanently invalid delivery token");
                }
                Ok(DispatchOutcome::Failed(err.code))
            }
        }
    }
}
