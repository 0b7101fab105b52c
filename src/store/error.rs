//! Error types for the document-store client.

use thiserror::Error;

/// Errors that can occur talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or answered with a failure status.
    #[error("document store unavailable ({status:?}): {message}")]
    Upstream {
        /// HTTP status, when a response was received at all.
        status: Option<u16>,
        /// Upstream error text.
        message: String,
    },

    /// A create-with-id hit an existing document.
    #[error("document already exists: {collection}/{id}")]
    AlreadyExists {
        /// Collection of the conflicting document.
        collection: &'static str,
        /// Id of the conflicting document.
        id: String,
    },

    /// A required document is missing.
    #[error("document not found: {collection}/{id}")]
    NotFound {
        /// Collection looked in.
        collection: &'static str,
        /// Id looked up.
        id: String,
    },

    /// A stored document could not be decoded into its record type.
    #[error("malformed document: {0}")]
    Decode(String),

    /// A record could not be encoded into document fields.
    #[error("invalid document payload: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL building error.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl StoreError {
    /// Whether the caller may retry the operation with backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

/// Convenience result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
