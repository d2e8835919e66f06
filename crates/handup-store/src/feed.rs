//! Change-feed abstraction: how the store's change notifications reach
//! the reactor.
//!
//! The transport behind a feed is the store's concern (server push,
//! polling, webhook); the reactor's only contract is to process each
//! delivered event independently. Delivery is at-least-once: the same
//! event may show up twice, and events for different documents arrive
//! in no particular order.

use async_trait::async_trait;
use handup_core::StoreEvent;

/// A subscription to the store's typed change events.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Receive the next change event.
    ///
    /// Blocks until an event is available. Returns `None` once the
    /// feed is closed and drained.
    async fn next(&self) -> Option<StoreEvent>;
}
