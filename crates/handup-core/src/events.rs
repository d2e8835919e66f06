//! Typed change events emitted by the document store.
//!
//! The store delivers a before/after snapshot pair for updates and a
//! single snapshot for creates, together with the path parameters that
//! identify which document fired. Delivery is at-least-once with no
//! ordering guarantee between events.

use serde::{Deserialize, Serialize};

use crate::entities::{Message, Post};
use crate::types::{MessageId, PostId};

/// Before/after snapshot pair carried by an update event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updated<T> {
    /// Document state before the write.
    pub before: T,
    /// Document state after the write.
    pub after: T,
}

impl<T> Updated<T> {
    /// Pair up a before/after snapshot.
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }
}

/// Single snapshot carried by a create event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created<T> {
    /// The document as first written.
    pub snapshot: T,
}

impl<T> Created<T> {
    /// Wrap a created snapshot.
    pub fn new(snapshot: T) -> Self {
        Self { snapshot }
    }
}

/// A change event from the document store, addressed by path parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A post document was created.
    PostCreated {
        /// Path parameter: the post that fired.
        post_id: PostId,
        /// The created snapshot.
        created: Created<Post>,
    },

    /// A post document was updated.
    PostUpdated {
        /// Path parameter: the post that fired.
        post_id: PostId,
        /// Before/after snapshots.
        change: Updated<Post>,
    },

    /// A message document was created under a post.
    MessageCreated {
        /// Path parameter: the parent post.
        post_id: PostId,
        /// Path parameter: the message that fired.
        message_id: MessageId,
        /// The created snapshot.
        created: Created<Message>,
    },
}

impl StoreEvent {
    /// The post this event is scoped to.
    pub fn post_id(&self) -> &PostId {
        match self {
            StoreEvent::PostCreated { post_id, .. }
            | StoreEvent::PostUpdated { post_id, .. }
            | StoreEvent::MessageCreated { post_id, .. } => post_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Post;

    #[test]
    fn test_event_post_id() {
        let post = Post::new("p1", "owner");
        let event = StoreEvent::PostCreated {
            post_id: post.id.clone(),
            created: Created::new(post),
        };
        assert_eq!(event.post_id().as_str(), "p1");
    }

    #[test]
    fn test_updated_pair() {
        let before = Post::new("p1", "owner");
        let mut after = before.clone();
        after.completed = true;
        let change = Updated::new(before.clone(), after.clone());
        assert_eq!(change.before, before);
        assert_eq!(change.after, after);
    }
}
