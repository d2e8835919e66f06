//! Error types for push delivery.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-defined error codes for a failed send.
///
/// Two codes denote that the delivery token is permanently dead and
/// must be removed from the user record; everything else is transient
/// or a provider-side fault and leaves the token in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The token is malformed or was never valid.
    InvalidToken,
    /// The device uninstalled the app or rotated its token.
    Unregistered,
    /// The provider is temporarily unreachable or overloaded.
    Unavailable,
    /// The sender exceeded its delivery quota.
    QuotaExceeded,
    /// Any other provider-side failure.
    Internal,
}

impl ErrorCode {
    /// Whether this code means the stored token must be cleared.
    pub fn invalidates_token(self) -> bool {
        matches!(self, ErrorCode::InvalidToken | ErrorCode::Unregistered)
    }
}

/// A failed push send, carrying the provider's code and message.
#[derive(Debug, Clone, Error)]
#[error("push delivery failed ({code:?}): {message}")]
pub struct PushError {
    /// Provider error code.
    pub code: ErrorCode,
    /// Provider diagnostic text.
    pub message: String,
}

impl PushError {
    /// Build an error from a code with a canned message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_invalidity_codes() {
        assert!(ErrorCode::InvalidToken.invalidates_token());
        assert!(ErrorCode::Unregistered.invalidates_token());
        assert!(!ErrorCode::Unavailable.invalidates_token());
        assert!(!ErrorCode::QuotaExceeded.invalidates_token());
        assert!(!ErrorCode::Internal.invalidates_token());
    }

    #[test]
    fn test_error_display_carries_code() {
        let err = PushError::new(ErrorCode::Unregistered, "token gone");
        let text = err.to_string();
        assert!(text.contains("Unregistered"));
        assert!(text.contains("token gone"));
    }
}
