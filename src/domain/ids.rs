//! Identifier types for externally stored documents.
//!
//! This module is intentionally **type-heavy** and **logic-light**.
//! Every record in the external document store is keyed by a string id;
//! these newtypes keep the different id spaces apart at compile time.
//!
//! Ids are either minted locally (v4 UUID, via each type's `generate`) or
//! accepted from the outside world, in which case they are validated against
//! a conservative ASCII charset.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors returned when parsing/validating a document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocIdError {
    /// Empty (or whitespace-only) identifier.
    Empty,
    /// Exceeds the maximum accepted length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        got: usize,
    },
    /// Contains a disallowed character.
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// The index where it was found.
        index: usize,
    },
}

impl fmt::Display for DocIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "document id must not be empty"),
            Self::TooLong { max, got } => write!(f, "document id too long: got {got}, max {max}"),
            Self::InvalidChar { ch, index } => {
                write!(
                    f,
                    "document id contains invalid character {ch:?} at index {index}"
                )
            }
        }
    }
}

impl std::error::Error for DocIdError {}

/// Hard ceiling on accepted id length to prevent pathological payloads.
pub const MAX_DOC_ID_LEN: usize = 128;

/// Validate a raw id string against the shared rules.
///
/// Rules:
/// - Non-empty after trimming.
/// - Max length limited to [`MAX_DOC_ID_LEN`].
/// - Conservative ASCII set: `[A-Za-z0-9._:@+-]`.
///
/// # Errors
/// Returns `DocIdError` if the input is empty, too long, or contains invalid
/// characters.
pub fn validate_doc_id(raw: &str) -> Result<&str, DocIdError> {
    let s = raw.trim();

    if s.is_empty() {
        return Err(DocIdError::Empty);
    }
    if s.len() > MAX_DOC_ID_LEN {
        return Err(DocIdError::TooLong {
            max: MAX_DOC_ID_LEN,
            got: s.len(),
        });
    }

    for (i, ch) in s.chars().enumerate() {
        let ok = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | ':' | '@' | '+' | '-');
        if !ok {
            return Err(DocIdError::InvalidChar { ch, index: i });
        }
    }

    Ok(s)
}

/// Declare a string-backed document id newtype with a consistent API.
macro_rules! define_doc_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Build a validated id from an external string.
            ///
            /// # Errors
            /// Returns `DocIdError` if the input is empty, too long, or
            /// contains invalid characters.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, DocIdError> {
                validate_doc_id(raw.as_ref()).map(|s| Self(s.to_owned()))
            }

            /// Mint a fresh random id (v4 UUID).
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow as `&str`.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into `String`.
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DocIdError;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(value: $name) -> Self {
                value.into_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = DocIdError;

            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_doc_id!(
    /// User account identifier (the auth provider's uid).
    ///
    /// Doubles as the participant identifier in two-party conversations.
    UserId
);

define_doc_id!(
    /// Job posting identifier.
    JobId
);

define_doc_id!(
    /// Job application identifier.
    ApplicationId
);

define_doc_id!(
    /// Scheduled interview identifier.
    InterviewId
);

define_doc_id!(
    /// Video call identifier on the external video platform.
    CallId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_uid() {
        let id = UserId::new("fJ3k9_xQ2aNpR7sL0wYv");
        assert!(id.is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(UserId::new(""), Err(DocIdError::Empty));
        assert_eq!(UserId::new("   "), Err(DocIdError::Empty));
    }

    #[test]
    fn test_rejects_invalid_chars() {
        let err = JobId::new("jobs/123");
        assert_eq!(
            err,
            Err(DocIdError::InvalidChar { ch: '/', index: 4 })
        );
    }

    #[test]
    fn test_rejects_overlong() {
        let raw = "a".repeat(MAX_DOC_ID_LEN + 1);
        assert!(matches!(UserId::new(raw), Err(DocIdError::TooLong { .. })));
    }

    #[test]
    fn test_generate_is_valid() {
        let id = InterviewId::generate();
        assert!(InterviewId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("u1").map(|u| serde_json::to_string(&u));
        assert_eq!(id.ok().and_then(Result::ok).as_deref(), Some("\"u1\""));
    }
}
