//! Record types exchanged with the messaging platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{JobId, UserId};

use super::channel::ConversationId;

/// A two-party conversation record on the messaging platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Deterministic conversation id.
    pub id: ConversationId,
    /// The two participants, in derivation order.
    pub members: Vec<UserId>,
    /// Optional topic reference (a posting id), display-only metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    /// Creation time reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Identity pushed to the messaging platform at upsert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUser {
    /// Account id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Product role, forwarded as free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One message appended to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Message body.
    pub text: String,
    /// Marks system-sent notices (status changes, interview invites).
    #[serde(default)]
    pub is_notification: bool,
    /// Posting title carried with a notice, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl ChannelMessage {
    /// A plain user message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_notification: false,
            job_title: None,
        }
    }

    /// A system notice, optionally carrying the posting title.
    #[must_use]
    pub fn notification(text: impl Into<String>, job_title: Option<String>) -> Self {
        Self {
            text: text.into(),
            is_notification: true,
            job_title,
        }
    }
}
