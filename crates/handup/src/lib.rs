//! # Handup
//!
//! The reactive backend core of a peer-to-peer help-request
//! marketplace. Reacts to change events from the external document
//! store: awards a trust point when a request is completed, and pushes
//! a notification to the counterpart when a request is accepted or a
//! chat message arrives.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use handup::Reactor;
//! use handup_notify::RecordingPush;
//! use handup_store::MemoryStore;
//!
//! # async fn example() {
//! let store = Arc::new(MemoryStore::new());
//! let push = Arc::new(RecordingPush::new());
//!
//! let feed = store.subscribe();
//! let reactor = Reactor::new(Arc::clone(&store), push);
//! reactor.run(&feed).await;
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - A completion awards exactly one trust point per (helper, post),
//!   even under concurrent or duplicate event delivery.
//! - Notification delivery is best-effort: a failed send never fails
//!   the handler, and a permanently invalid delivery token is cleared
//!   from the user record.

pub mod error;
pub mod reactor;
pub mod trust;

pub use error::{ReactorError, Result};
pub use reactor::{
    Reactor, ACCEPTED_TITLE, DESCRIPTION_PREVIEW_CHARS, EMPTY_MESSAGE_BODY, MESSAGE_PREVIEW_CHARS,
};
pub use trust::TrustLedger;

// Re-export the crates a consumer needs to stand up a reactor.
pub use handup_core::{
    Created, Message, MessageId, Post, PostId, Recipient, StoreEvent, Updated, User, UserId,
};
pub use handup_notify::{DispatchOutcome, ErrorCode, Notifier, PushClient, PushError, SkipReason};
pub use handup_store::{ChangeFeed, Store, StoreError};
