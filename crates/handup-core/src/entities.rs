//! The documents this core reads and writes.
//!
//! All entities live in the external document store; this crate only
//! defines their shape. Serde defaults mirror the store's loose schema:
//! a document written by an older client may lack any of the optional
//! fields, and absence must read as zero/empty rather than fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{MessageId, PostId, UserId};

/// A marketplace participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable document key.
    pub id: UserId,

    /// Name shown to counterparts in notifications.
    #[serde(default)]
    pub display_name: String,

    /// Reputation counter. Only ever increases, by exactly 1 per
    /// qualifying completion, and at most once per post.
    #[serde(default)]
    pub trust_score: u64,

    /// Opaque per-device push routing token. Absent when the user has
    /// no reachable device; cleared when the provider reports it
    /// permanently invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_token: Option<String>,

    /// Posts this user has already been rewarded for. Checked and
    /// extended inside the trust-award transaction so a redelivered
    /// completion event cannot award twice.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub awarded_posts: BTreeSet<PostId>,
}

impl User {
    /// Create a fresh user document with zeroed counters.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            trust_score: 0,
            delivery_token: None,
            awarded_posts: BTreeSet::new(),
        }
    }

    /// Builder-style display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Builder-style delivery token.
    pub fn with_delivery_token(mut self, token: impl Into<String>) -> Self {
        self.delivery_token = Some(token.into());
        self
    }
}

/// A help request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Stable document key.
    pub id: PostId,

    /// The user who created the request.
    pub owner_id: UserId,

    /// The helper who accepted the request. Absent until accepted;
    /// re-acceptance is not modeled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<UserId>,

    /// Flips false -> true at most once; the flip triggers the reward.
    #[serde(default)]
    pub completed: bool,

    /// When set, the owner is not shown the helper's name.
    #[serde(default)]
    pub anonymous: bool,

    /// Free-form description of the request.
    #[serde(default)]
    pub description: String,
}

impl Post {
    /// Create a new open post.
    pub fn new(id: impl Into<PostId>, owner_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            accepted_by: None,
            completed: false,
            anonymous: false,
            description: String::new(),
        }
    }

    /// Builder-style description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style anonymity flag.
    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }
}

/// A chat message under a post. Created once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Stable document key.
    pub id: MessageId,

    /// The post this message belongs to.
    pub post_id: PostId,

    /// The user who sent the message.
    pub sender_id: UserId,

    /// Message body. Absent for e.g. attachment-only messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
