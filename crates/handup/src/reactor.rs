//! The Reactor: guard-and-dispatch handlers for document change events.
//!
//! Each handler invocation is independent; nothing persists across
//! invocations. Handlers are safe under concurrent and duplicate
//! delivery: the trust path deduplicates inside its transaction, the
//! notification paths are best-effort.

use std::collections::BTreeMap;
use std::sync::Arc;

use handup_core::{
    acceptance_recipient, message_recipient, truncate_chars, Message, Post, PostId, StoreEvent,
};
use handup_notify::{Notifier, PushClient};
use handup_store::{ChangeFeed, Store};
use tracing::{debug, error};

use crate::error::Result;
use crate::trust::TrustLedger;

/// Title of the acceptance notification.
pub const ACCEPTED_TITLE: &str = "Your post was accepted!";

/// Body used when a message carries no text.
pub const EMPTY_MESSAGE_BODY: &str = "New message";

/// How many characters of the post description the acceptance body shows.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// How many characters of a message the notification body shows.
pub const MESSAGE_PREVIEW_CHARS: usize = 60;

fn routing_data(event_type: &str, post_id: &PostId) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    data.insert("type".to_owned(), event_type.to_owned());
    data.insert("postId".to_owned(), post_id.to_string());
    data
}

/// The reactive core: routes change events into trust awards and
/// notifications.
///
/// All collaborators are injected; the reactor holds no state of its
/// own beyond the handles.
pub struct Reactor<S, P> {
    store: Arc<S>,
    trust: TrustLedger<S>,
    notifier: Notifier<S, P>,
}

impl<S: Store, P: PushClient> Reactor<S, P> {
    /// Create a reactor over the given store and push client.
    pub fn new(store: Arc<S>, push: Arc<P>) -> Self {
        Self {
            trust: TrustLedger::new(Arc::clone(&store)),
            notifier: Notifier::new(Arc::clone(&store), push),
            store,
        }
    }

    /// Get the store handle.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Entry Points
    // ─────────────────────────────────────────────────────────────────────────

    /// Process one change event.
    ///
    /// A post update runs the completion guard before the acceptance
    /// guard, so a reward can never be held up by the notification
    /// path. Post creations carry no reactive behavior and are ignored.
    pub async fn handle_event(&self, event: &StoreEvent) -> Result<()> {
        match event {
            StoreEvent::PostCreated { post_id, .. } => {
                debug!(post = %post_id, "post created, nothing to do");
                Ok(())
            }
            StoreEvent::PostUpdated { post_id, change } => {
                self.on_post_completed(&change.before, &change.after).await?;
                self.on_post_accepted(&change.before, &change.after, post_id)
                    .await
            }
            StoreEvent::MessageCreated {
                post_id, created, ..
            } => self.on_message_created(&created.snapshot, post_id).await,
        }
    }

    /// Drain a change feed until it closes.
    ///
    /// A failed handler invocation is logged and the loop continues;
    /// retry of the event belongs to the store's at-least-once
    /// redelivery, not to this core.
    pub async fn run<F: ChangeFeed>(&self, feed: &F) {
        while let Some(event) = feed.next().await {
            if let Err(err) = self.handle_event(&event).await {
                error!(post = %event.post_id(), "handler failed: {err}");
            }
        }
        debug!("change feed closed, reactor stopping");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Fires when a post's `completed` flag flips to true with a helper
    /// attached: awards the helper one trust point. No notification.
    pub async fn on_post_completed(&self, before: &Post, after: &Post) -> Result<()> {
        if before.completed == after.completed || !after.completed {
            return Ok(());
        }
        let Some(helper_id) = &after.accepted_by else {
            debug!(post = %after.id, "completed without a helper, no reward");
            return Ok(());
        };

        self.trust.award(helper_id, &after.id).await?;
        Ok(())
    }

    /// Fires when `accepted_by` transitions from absent to present:
    /// tells the owner who is coming to help.
    pub async fn on_post_accepted(
        &self,
        before: &Post,
        after: &Post,
        post_id: &PostId,
    ) -> Result<()> {
        if before.accepted_by.is_some() || after.accepted_by.is_none() {
            return Ok(());
        }

        let helper = match &after.accepted_by {
            Some(helper_id) => self.store.get_user(helper_id).await?,
            None => None,
        };
        let Some(recipient) = acceptance_recipient(before, after, helper.as_ref()) else {
            debug!(post = %post_id, "acceptance produced no recipient");
            return Ok(());
        };

        let body = format!(
            "{} is ready to help with: \"{}\"",
            recipient.actor_name,
            truncate_chars(&after.description, DESCRIPTION_PREVIEW_CHARS)
        );
        let outcome = self
            .notifier
            .notify(
                &recipient.user_id,
                ACCEPTED_TITLE,
                &body,
                routing_data("post_accepted", post_id),
            )
            .await?;
        debug!(post = %post_id, recipient = %recipient.user_id, ?outcome, "acceptance dispatch");
        Ok(())
    }

    /// Fires on every message creation: notifies the conversation
    /// counterpart, if one exists.
    pub async fn on_message_created(&self, message: &Message, post_id: &PostId) -> Result<()> {
        let Some(post) = self.store.get_post(post_id).await? else {
            debug!(post = %post_id, "message under unknown post, nothing to do");
            return Ok(());
        };

        let sender = self.store.get_user(&message.sender_id).await?;
        let Some(recipient) = message_recipient(&post, &message.sender_id, sender.as_ref()) else {
            debug!(post = %post_id, "message produced no recipient");
            return Ok(());
        };

        let title = format!("Message from {}", recipient.actor_name);
        let body = match message.text.as_deref() {
            Some(text) if !text.is_empty() => truncate_chars(text, MESSAGE_PREVIEW_CHARS),
            _ => EMPTY_MESSAGE_BODY,
        };
        let outcome = self
            .notifier
            .notify(
                &recipient.user_id,
                &title,
                body,
                routing_data("new_message", post_id),
            )
            .await?;
        debug!(post = %post_id, recipient = %recipient.user_id, ?outcome, "message dispatch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handup_core::{MessageId, Updated, User, UserId};
    use handup_notify::RecordingPush;
    use handup_store::MemoryStore;

    fn reactor() -> (Arc<MemoryStore>, Arc<RecordingPush>, Reactor<MemoryStore, RecordingPush>) {
        let store = Arc::new(MemoryStore::new());
        let push = Arc::new(RecordingPush::new());
        let reactor = Reactor::new(Arc::clone(&store), Arc::clone(&push));
        (store, push, reactor)
    }

    fn accepted_post(owner: &str, helper: &str) -> Post {
        let mut post = Post::new("p1", owner);
        post.accepted_by = Some(UserId::from(helper));
        post
    }

    #[tokio::test]
    async fn test_completion_awards_helper() {
        let (store, push, reactor) = reactor();
        let before = accepted_post("alice", "bob");
        let mut after = before.clone();
        after.completed = true;

        reactor.on_post_completed(&before, &after).await.unwrap();

        let bob = store.get_user(&UserId::from("bob")).await.unwrap().unwrap();
        assert_eq!(bob.trust_score, 1);
        assert_eq!(push.call_count(), 0);
    }

    #[tokio::test]
    async fn test_already_completed_does_not_award() {
        let (store, _, reactor) = reactor();
        let mut post = accepted_post("alice", "bob");
        post.completed = true;

        reactor.on_post_completed(&post, &post).await.unwrap();
        assert!(store.get_user(&UserId::from("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_completion_without_helper_does_not_award() {
        let (store, _, reactor) = reactor();
        let before = Post::new("p1", "alice");
        let mut after = before.clone();
        after.completed = true;

        reactor.on_post_completed(&before, &after).await.unwrap();
        assert!(store
            .get_user(&UserId::from("alice"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_uncompleting_a_post_does_not_award() {
        let (store, _, reactor) = reactor();
        let mut before = accepted_post("alice", "bob");
        before.completed = true;
        let mut after = before.clone();
        after.completed = false;

        reactor.on_post_completed(&before, &after).await.unwrap();
        assert!(store.get_user(&UserId::from("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_acceptance_notifies_owner_with_preview() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));
        store.put_user(User::new("bob").with_display_name("Bob"));

        let before = Post::new("p1", "alice").with_description("x".repeat(80));
        let mut after = before.clone();
        after.accepted_by = Some(UserId::from("bob"));

        reactor
            .on_post_accepted(&before, &after, &after.id.clone())
            .await
            .unwrap();

        let calls = push.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].title, ACCEPTED_TITLE);
        assert_eq!(
            calls[0].body,
            format!("Bob is ready to help with: \"{}\"", "x".repeat(50))
        );
        assert_eq!(calls[0].data.get("type").unwrap(), "post_accepted");
        assert_eq!(calls[0].data.get("postId").unwrap(), "p1");
    }

    #[tokio::test]
    async fn test_self_acceptance_sends_nothing() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));

        let before = Post::new("p1", "alice");
        let mut after = before.clone();
        after.accepted_by = Some(UserId::from("alice"));

        reactor
            .on_post_accepted(&before, &after, &after.id.clone())
            .await
            .unwrap();
        assert_eq!(push.call_count(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_acceptance_hides_name() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));
        store.put_user(User::new("bob").with_display_name("Bob"));

        let before = Post::new("p1", "alice")
            .with_description("garden")
            .anonymous(true);
        let mut after = before.clone();
        after.accepted_by = Some(UserId::from("bob"));

        reactor
            .on_post_accepted(&before, &after, &after.id.clone())
            .await
            .unwrap();

        let calls = push.calls();
        assert_eq!(calls[0].body, "Someone is ready to help with: \"garden\"");
    }

    #[tokio::test]
    async fn test_message_under_missing_post_is_noop() {
        let (_, push, reactor) = reactor();
        let message = Message {
            id: MessageId::from("m1"),
            post_id: PostId::from("ghost"),
            sender_id: UserId::from("bob"),
            text: Some("hi".into()),
        };

        reactor
            .on_message_created(&message, &PostId::from("ghost"))
            .await
            .unwrap();
        assert_eq!(push.call_count(), 0);
    }

    #[tokio::test]
    async fn test_message_from_owner_on_unaccepted_post_is_noop() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));
        store.put_post(Post::new("p1", "alice")).await;

        let message = Message {
            id: MessageId::from("m1"),
            post_id: PostId::from("p1"),
            sender_id: UserId::from("alice"),
            text: Some("anyone?".into()),
        };

        reactor
            .on_message_created(&message, &PostId::from("p1"))
            .await
            .unwrap();
        assert_eq!(push.call_count(), 0);
    }

    #[tokio::test]
    async fn test_message_without_text_uses_placeholder_body() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));
        store.put_user(User::new("bob").with_display_name("Bob"));
        store.put_post(accepted_post("alice", "bob")).await;

        let message = Message {
            id: MessageId::from("m1"),
            post_id: PostId::from("p1"),
            sender_id: UserId::from("bob"),
            text: None,
        };

        reactor
            .on_message_created(&message, &PostId::from("p1"))
            .await
            .unwrap();

        let calls = push.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].title, "Message from Bob");
        assert_eq!(calls[0].body, EMPTY_MESSAGE_BODY);
        assert_eq!(calls[0].data.get("type").unwrap(), "new_message");
    }

    #[tokio::test]
    async fn test_message_title_falls_back_for_unknown_sender() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));
        store.put_post(accepted_post("alice", "bob")).await;

        let message = Message {
            id: MessageId::from("m1"),
            post_id: PostId::from("p1"),
            sender_id: UserId::from("bob"),
            text: Some("hello".into()),
        };

        reactor
            .on_message_created(&message, &PostId::from("p1"))
            .await
            .unwrap();
        assert_eq!(push.calls()[0].title, "Message from Someone");
    }

    #[tokio::test]
    async fn test_post_created_event_is_ignored() {
        let (_, push, reactor) = reactor();
        let post = Post::new("p1", "alice");
        let event = StoreEvent::PostCreated {
            post_id: post.id.clone(),
            created: handup_core::Created::new(post),
        };

        reactor.handle_event(&event).await.unwrap();
        assert_eq!(push.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_event_routes_to_both_post_handlers() {
        let (store, push, reactor) = reactor();
        store.put_user(User::new("alice").with_delivery_token("tok-a"));

        // One update that both accepts and completes: the helper gets
        // the reward and the owner still gets the acceptance note.
        let before = Post::new("p1", "alice").with_description("move a couch");
        let mut after = before.clone();
        after.accepted_by = Some(UserId::from("bob"));
        after.completed = true;

        let event = StoreEvent::PostUpdated {
            post_id: after.id.clone(),
            change: Updated::new(before, after),
        };
        reactor.handle_event(&event).await.unwrap();

        let bob = store.get_user(&UserId::from("bob")).await.unwrap().unwrap();
        assert_eq!(bob.trust_score, 1);
        assert_eq!(push.call_count(), 1);
    }
}
