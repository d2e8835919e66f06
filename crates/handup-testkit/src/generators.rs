//! Proptest generators for property-based testing.

use proptest::prelude::*;

use handup_core::{Message, MessageId, Post, PostId, User, UserId};

/// Generate a user id.
pub fn user_id() -> impl Strategy<Value = UserId> {
    "[a-z][a-z0-9]{0,15}".prop_map(UserId::from)
}

/// Generate a post id.
pub fn post_id() -> impl Strategy<Value = PostId> {
    "p-[a-z0-9]{1,12}".prop_map(PostId::from)
}

/// Generate a message id.
pub fn message_id() -> impl Strategy<Value = MessageId> {
    "m-[a-z0-9]{1,12}".prop_map(MessageId::from)
}

/// Generate a display name, sometimes empty (store documents may lack
/// the field) and sometimes multi-byte.
pub fn display_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Z][a-z]{1,11}".prop_map(String::from),
        Just("Åsa Ærø".to_owned()),
    ]
}

/// Generate a delivery token, absent for users without a device.
pub fn delivery_token() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => "tok-[a-f0-9]{8}".prop_map(Some),
        1 => Just(None),
    ]
}

/// Generate free-form text, including multi-byte content longer than
/// any preview window.
pub fn body_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "\\PC{1,120}".prop_map(String::from),
    ]
}

/// Generate a user document.
pub fn user() -> impl Strategy<Value = User> {
    (user_id(), display_name(), 0u64..1000, delivery_token()).prop_map(
        |(id, name, score, token)| {
            let mut user = User::new(id).with_display_name(name);
            user.trust_score = score;
            user.delivery_token = token;
            user
        },
    )
}

/// Generate a post document with an independent owner and optional helper.
pub fn post() -> impl Strategy<Value = Post> {
    (
        post_id(),
        user_id(),
        prop::option::of(user_id()),
        any::<bool>(),
        any::<bool>(),
        body_text(),
    )
        .prop_map(|(id, owner, helper, completed, anonymous, description)| {
            let mut post = Post::new(id, owner).with_description(description);
            post.accepted_by = helper;
            post.completed = completed;
            post.anonymous = anonymous;
            post
        })
}

/// Generate a message under the given post.
pub fn message_under(post_id: PostId) -> impl Strategy<Value = Message> {
    (message_id(), user_id(), prop::option::of(body_text())).prop_map(
        move |(id, sender_id, text)| Message {
            id,
            post_id: post_id.clone(),
            sender_id,
            text,
        },
    )
}
