//! # Handup Core
//!
//! Pure primitives for the Handup reactor: entities, change events, and
//! recipient resolution.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over marketplace documents.
//!
//! ## Key Types
//!
//! - [`User`], [`Post`], [`Message`] - The documents this core reads and writes
//! - [`StoreEvent`] - A typed change event emitted by the document store
//! - [`Recipient`] - A resolved notification target with its actor display name
//!
//! ## Resolution
//!
//! Recipient resolution is total: no-op cases (self-notification,
//! unaccepted post, missing counterpart) are `None`, never an error.
//! See [`recipient`] module.

pub mod entities;
pub mod events;
pub mod recipient;
pub mod text;
pub mod types;

pub use entities::{Message, Post, User};
pub use events::{Created, StoreEvent, Updated};
pub use recipient::{acceptance_recipient, message_recipient, Recipient, FALLBACK_ACTOR_NAME};
pub use text::truncate_chars;
pub use types::{MessageId, PostId, UserId};
