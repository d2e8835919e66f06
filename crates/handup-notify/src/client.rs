//! Push client abstraction for the provider's send API.
//!
//! The trait is the seam between the dispatcher and the hosted push
//! provider. Implementations may speak HTTP, a vendor SDK, or nothing
//! at all ([`RecordingPush`] for tests).

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PushError;

/// Result type for push operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// A structured notification handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Per-device routing token.
    pub token: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// String metadata the receiving client uses to route the tap,
    /// e.g. `{type, postId}`.
    pub data: BTreeMap<String, String>,
}

/// Trait for sending push notifications.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait PushClient: Send + Sync {
    /// Deliver one notification to one device.
    ///
    /// Errors carry the provider's [`crate::ErrorCode`]; the caller
    /// decides whether the code invalidates the stored token.
    async fn send(&self, message: &PushMessage) -> Result<()>;
}

/// A recording push client for testing.
///
/// Records every send call and can be scripted to fail upcoming calls
/// with specific provider codes.
#[derive(Default)]
pub struct RecordingPush {
    inner: std::sync::Mutex<RecordingInner>,
}

#[derive(Default)]
struct RecordingInner {
    calls: Vec<PushMessage>,
    scripted_failures: std::collections::VecDeque<PushError>,
}

impl RecordingPush {
    /// Create a new recording client that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next send call to fail with `error`. Multiple calls
    /// queue up in order; once the queue drains, sends succeed again.
    pub fn fail_next(&self, error: PushError) {
        self.inner
            .lock()
            .unwrap()
            .scripted_failures
            .push_back(error);
    }

    /// Every send call observed so far, including failed ones.
    pub fn calls(&self) -> Vec<PushMessage> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of send calls observed so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl PushClient for RecordingPush {
    async fn send(&self, message: &PushMessage) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(message.clone());
        match inner.scripted_failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn message(token: &str) -> PushMessage {
        PushMessage {
            token: token.into(),
            title: "t".into(),
            body: "b".into(),
            data: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_recording_push_records_calls() {
        let push = RecordingPush::new();
        push.send(&message("tok-1")).await.unwrap();
        push.send(&message("tok-2")).await.unwrap();

        let calls = push.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].token, "tok-1");
        assert_eq!(calls[1].token, "tok-2");
    }

    #[tokio::test]
    async fn test_scripted_failures_drain_in_order() {
        let push = RecordingPush::new();
        push.fail_next(PushError::new(ErrorCode::Unavailable, "down"));

        let err = push.send(&message("tok")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unavailable);

        // Queue drained; next send succeeds but is still recorded.
        push.send(&message("tok")).await.unwrap();
        assert_eq!(push.call_count(), 2);
    }
}
