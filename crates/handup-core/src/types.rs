//! Strong type definitions for Handup documents.
//!
//! All identifiers are newtypes to prevent misuse at compile time. The
//! external document store keys everything by opaque strings, so each
//! newtype wraps a `String` and serializes transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Stable key of a user document.
    UserId
}

string_id! {
    /// Stable key of a post (help request) document.
    PostId
}

string_id! {
    /// Stable key of a chat message document.
    MessageId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = UserId::from("alice");
        assert_eq!(format!("{}", id), "alice");
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn test_id_debug() {
        let id = PostId::new("post-7");
        assert_eq!(format!("{:?}", id), "PostId(post-7)");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = MessageId::from("m1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"m1\"");
        let back: MessageId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property: UserId and PostId do not unify.
        fn takes_user(_: &UserId) {}
        takes_user(&UserId::from("u"));
    }
}
