//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same observable semantics
//! as the external document store: versioned documents, an optimistic
//! serializable read-modify-write with a bounded retry budget, and
//! change-event fan-out to subscribed feeds.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use handup_core::{Created, Message, MessageId, Post, PostId, StoreEvent, Updated, User, UserId};

use crate::error::{Result, StoreError};
use crate::feed::ChangeFeed;
use crate::traits::{Store, UserUpdateFn};

/// Tunables for the in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// How many times a contended `modify_user` reruns before giving up.
    pub txn_attempts: u32,
    /// Buffer size of each subscribed change feed.
    pub feed_capacity: usize,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            txn_attempts: 8,
            feed_capacity: 256,
        }
    }
}

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock;
/// the lock is never held across an await point.
pub struct MemoryStore {
    config: MemoryStoreConfig,
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    users: HashMap<UserId, Versioned<User>>,
    posts: HashMap<PostId, Versioned<Post>>,
    messages: HashMap<MessageId, Message>,

    /// Change-feed subscribers.
    watchers: Vec<mpsc::Sender<StoreEvent>>,
}

/// A document plus its commit version, for optimistic concurrency.
struct Versioned<T> {
    doc: T,
    version: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store with default config.
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    /// Create a new empty in-memory store.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(MemoryStoreInner {
                users: HashMap::new(),
                posts: HashMap::new(),
                messages: HashMap::new(),
                watchers: Vec::new(),
            }),
        }
    }

    /// Subscribe to change events. Events are delivered for writes made
    /// after this call.
    pub fn subscribe(&self) -> MemoryFeed {
        let (tx, rx) = mpsc::channel(self.config.feed_capacity);
        self.inner.write().unwrap().watchers.push(tx);
        MemoryFeed {
            receiver: Mutex::new(rx),
        }
    }

    /// Insert or replace a user document. Does not emit a change event;
    /// the reactor only observes post and message paths.
    pub fn put_user(&self, user: User) {
        let mut inner = self.inner.write().unwrap();
        upsert(&mut inner.users, user.id.clone(), user);
    }

    /// Insert or replace a post document, emitting `PostCreated` or
    /// `PostUpdated` to every subscriber.
    pub async fn put_post(&self, post: Post) {
        let event = {
            let mut inner = self.inner.write().unwrap();
            let before = inner.posts.get(&post.id).map(|v| v.doc.clone());
            upsert(&mut inner.posts, post.id.clone(), post.clone());

            match before {
                Some(before) => StoreEvent::PostUpdated {
                    post_id: post.id.clone(),
                    change: Updated::new(before, post),
                },
                None => StoreEvent::PostCreated {
                    post_id: post.id.clone(),
                    created: Created::new(post),
                },
            }
        };
        self.emit(event).await;
    }

    /// Insert a message document, emitting `MessageCreated`.
    pub async fn create_message(&self, message: Message) {
        {
            let mut inner = self.inner.write().unwrap();
            inner.messages.insert(message.id.clone(), message.clone());
        }
        self.emit(StoreEvent::MessageCreated {
            post_id: message.post_id.clone(),
            message_id: message.id.clone(),
            created: Created::new(message),
        })
        .await;
    }

    /// Fetch a message (test-facing; the reactor receives messages via
    /// the change feed, not by lookup).
    pub fn get_message(&self, id: &MessageId) -> Option<Message> {
        self.inner.read().unwrap().messages.get(id).cloned()
    }

    async fn emit(&self, event: StoreEvent) {
        let watchers: Vec<mpsc::Sender<StoreEvent>> =
            self.inner.read().unwrap().watchers.clone();

        let mut any_closed = false;
        for watcher in &watchers {
            if watcher.send(event.clone()).await.is_err() {
                any_closed = true;
            }
        }

        if any_closed {
            let mut inner = self.inner.write().unwrap();
            inner.watchers.retain(|w| !w.is_closed());
        }
    }

    /// Force a version bump without changing the document, so a
    /// transaction reading the old version fails its commit.
    #[cfg(test)]
    fn bump_user_version(&self, id: &UserId) {
        let mut inner = self.inner.write().unwrap();
        if let Some(v) = inner.users.get_mut(id) {
            v.version += 1;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upsert<K: std::hash::Hash + Eq, T>(map: &mut HashMap<K, Versioned<T>>, key: K, doc: T) {
    match map.get_mut(&key) {
        Some(existing) => {
            existing.doc = doc;
            existing.version += 1;
        }
        None => {
            map.insert(key, Versioned { doc, version: 1 });
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(id).map(|v| v.doc.clone()))
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.posts.get(id).map(|v| v.doc.clone()))
    }

    async fn clear_delivery_token(&self, id: &UserId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if let Some(v) = inner.users.get_mut(id) {
            if v.doc.delivery_token.take().is_some() {
                v.version += 1;
            }
        }
        Ok(())
    }

    async fn modify_user(&self, id: &UserId, update: UserUpdateFn<'_>) -> Result<()> {
        for attempt in 1..=self.config.txn_attempts {
            // Read the current snapshot and its version. An absent
            // document reads as version 0 and commits as a create.
            let (snapshot, read_version) = {
                let inner = self.inner.read().unwrap();
                match inner.users.get(id) {
                    Some(v) => (Some(v.doc.clone()), v.version),
                    None => (None, 0),
                }
            };

            // The closure runs with no lock held, like the external
            // store's transaction callback.
            let updated = update(snapshot);

            let mut inner = self.inner.write().unwrap();
            let current_version = inner.users.get(id).map_or(0, |v| v.version);
            if current_version == read_version {
                inner.users.insert(
                    id.clone(),
                    Versioned {
                        doc: updated,
                        version: read_version + 1,
                    },
                );
                return Ok(());
            }

            debug!(user = %id, attempt, "transaction contended, retrying");
        }

        Err(StoreError::TransactionExhausted {
            attempts: self.config.txn_attempts,
        })
    }
}

/// Change feed backed by the in-memory store.
pub struct MemoryFeed {
    receiver: Mutex<mpsc::Receiver<StoreEvent>>,
}

#[async_trait]
impl ChangeFeed for MemoryFeed {
    async fn next(&self) -> Option<StoreEvent> {
        self.receiver.lock().await.recv().await
    }
}
