//! # Handup Notify
//!
//! Push-delivery abstraction and the notification dispatcher.
//!
//! ## Overview
//!
//! Delivery goes through the [`PushClient`] trait, which the production
//! deployment binds to the hosted push provider's send API. The
//! [`Notifier`] sits on top: it resolves a user to a delivery token,
//! sends, and cleans up tokens the provider reports as permanently
//! invalid.
//!
//! ## Key Types
//!
//! - [`PushClient`] - The async trait for the provider's send API
//! - [`PushMessage`] / [`PushError`] / [`ErrorCode`] - The wire surface
//! - [`Notifier`] - The dispatcher with token-invalidation cleanup
//! - [`DispatchOutcome`] - What happened to one notification
//! - [`RecordingPush`] - Scriptable test double
//!
//! ## Design Notes
//!
//! - **Best effort**: delivery failures never propagate. [`Notifier`]
//!   reports them as [`DispatchOutcome::Failed`] and logs; only store
//!   access faults are `Err`.
//! - **Expected absence**: a user without a reachable device is a
//!   steady state, surfaced as [`DispatchOutcome::Skipped`].

pub mod client;
pub mod dispatch;
pub mod error;

pub use client::{PushClient, PushMessage, RecordingPush};
pub use dispatch::{DispatchOutcome, Notifier, SkipReason};
pub use error::{ErrorCode, PushError};
