//! # Handup Testkit
//!
//! Testing utilities for the Handup reactor: ready-made fixtures over
//! the in-memory store and recording push client, plus proptest
//! strategies for marketplace documents.
//!
//! This crate is for tests only; nothing here ships.

pub mod fixtures;
pub mod generators;

pub use fixtures::TestFixture;
