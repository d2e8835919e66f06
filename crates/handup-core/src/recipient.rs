//! Recipient resolution: who gets notified, and under which name.
//!
//! Both rules are total functions. Every no-op case (self-notification,
//! unaccepted post, missing counterpart) resolves to `None`; nothing in
//! this module can fail.

use crate::entities::{Post, User};
use crate::types::UserId;

/// Display name used when the actor is anonymous or their user record
/// is missing.
pub const FALLBACK_ACTOR_NAME: &str = "Someone";

/// A resolved notification target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// The user to notify.
    pub user_id: UserId,
    /// Name of the acting counterpart, as it may appear in the
    /// notification text.
    pub actor_name: String,
}

/// Acceptance rule.
///
/// Selects a recipient only when `accepted_by` transitioned from absent
/// to present. The recipient is the post owner; self-acceptance is
/// suppressed. The actor name is [`FALLBACK_ACTOR_NAME`] when the post
/// is anonymous or the helper record is missing, otherwise the helper's
/// stored display name.
pub fn acceptance_recipient(before: &Post, after: &Post, helper: Option<&User>) -> Option<Recipient> {
    if before.accepted_by.is_some() {
        return None;
    }
    let helper_id = after.accepted_by.as_ref()?;

    if after.owner_id == *helper_id {
        // Owner accepted their own post; nobody to tell.
        return None;
    }

    let actor_name = if after.anonymous {
        FALLBACK_ACTOR_NAME.to_owned()
    } else {
        display_name_or_fallback(helper)
    };

    Some(Recipient {
        user_id: after.owner_id.clone(),
        actor_name,
    })
}

/// Message rule.
///
/// The sender is one of `{owner, helper}` and the recipient is the
/// other one. Resolves to `None` when the counterpart is absent (post
/// not yet accepted) or equal to the sender. The actor name is the
/// sender's display name, [`FALLBACK_ACTOR_NAME`] when their record is
/// missing.
pub fn message_recipient(post: &Post, sender_id: &UserId, sender: Option<&User>) -> Option<Recipient> {
    let recipient_id = if *sender_id == post.owner_id {
        post.accepted_by.clone()?
    } else {
        post.owner_id.clone()
    };

    if recipient_id == *sender_id {
        return None;
    }

    Some(Recipient {
        user_id: recipient_id,
        actor_name: display_name_or_fallback(sender),
    })
}

fn display_name_or_fallback(user: Option<&User>) -> String {
    match user {
        Some(u) if !u.display_name.is_empty() => u.display_name.clone(),
        _ => FALLBACK_ACTOR_NAME.to_owned(),
    }
}
