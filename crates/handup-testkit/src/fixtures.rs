//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a wired-up reactor over an
//! in-memory store and a recording push client, with shorthand for
//! seeding and mutating marketplace documents.

use std::sync::Arc;

use handup::Reactor;
use handup_core::{Message, MessageId, Post, PostId, User, UserId};
use handup_notify::RecordingPush;
use handup_store::{MemoryFeed, MemoryStore, Store};

/// A wired-up reactor with its in-memory collaborators.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub push: Arc<RecordingPush>,
    pub reactor: Reactor<MemoryStore, RecordingPush>,
}

impl TestFixture {
    /// Create a fixture with an empty store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let push = Arc::new(RecordingPush::new());
        let reactor = Reactor::new(Arc::clone(&store), Arc::clone(&push));
        Self {
            store,
            push,
            reactor,
        }
    }

    /// Subscribe to the store's change feed.
    pub fn feed(&self) -> MemoryFeed {
        self.store.subscribe()
    }

    /// Seed a user with a display name and a synthetic delivery token.
    pub fn seed_user(&self, id: &str, name: &str) -> UserId {
        self.store.put_user(
            User::new(id)
                .with_display_name(name)
                .with_delivery_token(format!("tok-{id}")),
        );
        UserId::from(id)
    }

    /// Seed a user with no delivery token (no reachable device).
    pub fn seed_tokenless_user(&self, id: &str, name: &str) -> UserId {
        self.store.put_user(User::new(id).with_display_name(name));
        UserId::from(id)
    }

    /// Create an open post, emitting `PostCreated`.
    pub async fn open_post(&self, id: &str, owner: &str, description: &str) -> PostId {
        self.store
            .put_post(Post::new(id, owner).with_description(description))
            .await;
        PostId::from(id)
    }

    /// Set `accepted_by` on an existing post, emitting `PostUpdated`.
    pub async fn accept_post(&self, post_id: &PostId, helper: &str) {
        let mut post = self.post(post_id).await;
        post.accepted_by = Some(UserId::from(helper));
        self.store.put_post(post).await;
    }

    /// Flip `completed` on an existing post, emitting `PostUpdated`.
    pub async fn complete_post(&self, post_id: &PostId) {
        let mut post = self.post(post_id).await;
        post.completed = true;
        self.store.put_post(post).await;
    }

    /// Create a chat message under a post, emitting `MessageCreated`.
    pub async fn send_message(&self, id: &str, post_id: &PostId, sender: &str, text: Option<&str>) {
        self.store
            .create_message(Message {
                id: MessageId::from(id),
                post_id: post_id.clone(),
                sender_id: UserId::from(sender),
                text: text.map(str::to_owned),
            })
            .await;
    }

    /// Fetch a post that is known to exist.
    pub async fn post(&self, id: &PostId) -> Post {
        self.store
            .get_post(id)
            .await
            .expect("memory store read")
            .expect("post seeded by fixture")
    }

    /// Fetch a user's current trust score, 0 when absent.
    pub async fn trust_score(&self, id: &UserId) -> u64 {
        self.store
            .get_user(id)
            .await
            .expect("memory store read")
            .map_or(0, |u| u.trust_score)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handup_core::StoreEvent;
    use handup_store::ChangeFeed;

    #[tokio::test]
    async fn test_fixture_lifecycle_shorthand() {
        let fx = TestFixture::new();
        let feed = fx.feed();

        let owner = fx.seed_user("alice", "Alice");
        let helper = fx.seed_user("bob", "Bob");
        let post_id = fx.open_post("p1", "alice", "rake leaves").await;

        fx.accept_post(&post_id, "bob").await;
        fx.complete_post(&post_id).await;

        // created + accepted + completed
        for _ in 0..3 {
            let event = feed.next().await.expect("event");
            fx.reactor.handle_event(&event).await.expect("handled");
        }

        assert_eq!(fx.trust_score(&helper).await, 1);
        assert_eq!(fx.trust_score(&owner).await, 0);
        assert_eq!(fx.push.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tokenless_owner_gets_no_send() {
        let fx = TestFixture::new();
        let feed = fx.feed();

        fx.seed_tokenless_user("alice", "Alice");
        fx.seed_user("bob", "Bob");
        let post_id = fx.open_post("p1", "alice", "water plants").await;
        fx.accept_post(&post_id, "bob").await;

        let _created = feed.next().await.expect("event");
        match feed.next().await.expect("event") {
            event @ StoreEvent::PostUpdated { .. } => {
                fx.reactor.handle_event(&event).await.expect("handled");
            }
            other => panic!("expected PostUpdated, got {:?}", other),
        }

        assert_eq!(fx.push.call_count(), 0);
    }
}
