//! Messaging platform integration.
//!
//! This module provides:
//! - Deterministic conversation identity and idempotent resolution
//! - The platform REST client (user upsert, channel lookup/create, send)
//! - Server-side token issuance (user and server tokens)
//!
//! The one piece with a real local contract is [`channel`]; everything
//! else forwards to the platform and propagates its failures unchanged.

pub mod channel;
pub mod client;
pub mod error;
pub mod token;
pub mod types;

pub use channel::{
    CONVERSATION_SEPARATOR, ChannelBackend, ChatFuture, ConversationId, ConversationKey,
    resolve_conversation, send_notification,
};
pub use client::StreamChatClient;
pub use error::{ChatError, ChatResult};
pub use types::{Channel, ChannelMessage, ChatUser};

use crate::config::StreamConfig;
use crate::domain::{JobId, UserId};

/// Facade over the messaging platform, owned by the application state.
///
/// The platform client is an explicit connection handle with a constructor
/// lifecycle: built once at startup, passed by reference to the handlers
/// that need it, dropped at shutdown. There is no ambient global client.
pub struct ChatService {
    client: StreamChatClient,
}

impl ChatService {
    /// Build the platform connection handle.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(config: StreamConfig) -> ChatResult<Self> {
        Ok(Self {
            client: StreamChatClient::new(config)?,
        })
    }

    /// Issue a signed token for one account.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn user_token(&self, user_id: &UserId) -> ChatResult<String> {
        token::user_token(self.client.config(), user_id)
    }

    /// Create or update the platform identity of one account.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached.
    pub async fn upsert_user(&self, user: &ChatUser) -> ChatResult<()> {
        self.client.upsert_user(user).await
    }

    /// Resolve the conversation between two participants, creating it on
    /// first contact (see [`channel::resolve_conversation`]).
    ///
    /// # Errors
    /// Propagates resolver and platform errors unchanged.
    pub async fn resolve_conversation(
        &self,
        a: &UserId,
        b: &UserId,
        job_id: Option<&JobId>,
    ) -> ChatResult<Channel> {
        channel::resolve_conversation(&self.client, a, b, job_id).await
    }

    /// Resolve the conversation between sender and receiver, then append
    /// one notification message.
    ///
    /// # Errors
    /// Propagates resolver and platform errors unchanged.
    pub async fn send_notification(
        &self,
        sender: &UserId,
        receiver: &UserId,
        text: impl Into<String>,
        job_title: Option<String>,
    ) -> ChatResult<()> {
        channel::send_notification(&self.client, sender, receiver, text, job_title).await
    }
}
