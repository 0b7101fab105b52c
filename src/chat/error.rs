//! Error types for the messaging module.

use thiserror::Error;

/// Errors that can occur during messaging operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Caller-side contract violation: empty or identical participant
    /// identifiers. Not retryable; the caller must fix its input.
    #[error("invalid participants: {0}")]
    InvalidParticipants(String),

    /// A participant identifier contains the reserved conversation
    /// separator; deriving an id from it would be ambiguous. Surfaced as a
    /// fatal configuration error rather than producing a colliding id.
    #[error("identifier {id:?} contains the reserved separator {separator:?}")]
    IdentifierCollision {
        /// The offending identifier.
        id: String,
        /// The reserved separator.
        separator: &'static str,
    },

    /// The messaging platform could not be reached or answered with a
    /// failure. Retryable by the caller with backoff; never retried here.
    #[error("messaging platform unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// A platform response could not be decoded.
    #[error("malformed platform response: {0}")]
    Decode(String),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL building error.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl ChatError {
    /// Whether the caller may retry the operation with backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

/// Convenience result alias for messaging operations.
pub type ChatResult<T> = Result<T, ChatError>;
