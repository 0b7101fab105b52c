//! REST client for the messaging platform.
//!
//! Covers the platform primitives the product uses: user upsert, channel
//! lookup by id, channel creation with a member list and free-form
//! metadata, and message send. Requests authenticate with a server token
//! (HS256, `server` claim) plus the public API key.

use chrono::DateTime;
use serde_json::{Map, Value, json};
use url::Url;

use crate::config::StreamConfig;
use crate::domain::{JobId, UserId};

use super::channel::{ChannelBackend, ChatFuture, ConversationId};
use super::error::{ChatError, ChatResult};
use super::token;
use super::types::{Channel, ChannelMessage, ChatUser};

/// Channel type used for all two-party conversations.
const CHANNEL_TYPE: &str = "messaging";

/// Parse one channel-state object into a [`Channel`].
///
/// Lookup and create responses wrap the channel record the same way: the
/// record itself under `channel`, the membership beside it under `members`.
///
/// # Errors
/// Returns [`ChatError::Decode`] when the record has no id or a malformed
/// member list.
pub fn parse_channel_state(state: &Value) -> ChatResult<Channel> {
    let record = state.get("channel").unwrap_or(state);

    let id = record
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ChatError::Decode("channel without an id".to_string()))?;

    let raw_members = state
        .get("members")
        .or_else(|| record.get("members"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut members = Vec::with_capacity(raw_members.len());
    for member in raw_members {
        let user_id = member
            .get("user_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ChatError::Decode("member without a user_id".to_string()))?;
        members.push(
            UserId::new(user_id).map_err(|e| ChatError::Decode(format!("bad member id: {e}")))?,
        );
    }

    let job_id = record
        .get("job_id")
        .and_then(Value::as_str)
        .and_then(|raw| JobId::new(raw).ok());

    let created_at = record
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.to_utc());

    Ok(Channel {
        id: ConversationId::from_raw(id),
        members,
        job_id,
        created_at,
    })
}

/// Client for the messaging platform's REST surface.
pub struct StreamChatClient {
    client: reqwest::Client,
    config: StreamConfig,
}

impl StreamChatClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: StreamConfig) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Borrow the platform configuration.
    #[must_use]
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Build a request URL with the public API key applied.
    fn url(&self, path: &str) -> ChatResult<Url> {
        let mut url = Url::parse(&format!(
            "{}{path}",
            self.config.chat_base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut().append_pair("api_key", &self.config.api_key);
        Ok(url)
    }

    /// POST a JSON body with server authentication; non-success statuses
    /// surface as [`ChatError::UpstreamUnavailable`].
    async fn post(&self, path: &str, body: &Value) -> ChatResult<Value> {
        let url = self.url(path)?;
        let auth = token::server_token(&self.config)?;

        let response = self
            .client
            .post(url)
            .header("Authorization", auth)
            .header("stream-auth-type", "jwt")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::UpstreamUnavailable(format!(
                "status {status}: {message}"
            )));
        }

        response.json().await.map_err(Into::into)
    }

    /// Create or update the platform identity of one account.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached.
    pub async fn upsert_user(&self, user: &ChatUser) -> ChatResult<()> {
        let mut users = Map::new();
        users.insert(user.id.to_string(), serde_json::to_value(user)?);
        let body = json!({ "users": users });
        self.post("/users", &body).await.map(|_| ())
    }

    async fn lookup(&self, id: &ConversationId) -> ChatResult<Option<Channel>> {
        let body = json!({
            "filter_conditions": { "type": CHANNEL_TYPE, "id": id.as_str() },
            "state": true,
            "watch": false,
            "presence": false,
        });
        let raw = self.post("/channels", &body).await?;

        let states = raw.get("channels").and_then(Value::as_array);
        match states.and_then(|s| s.first()) {
            Some(state) => parse_channel_state(state).map(Some),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        id: &ConversationId,
        members: &[UserId; 2],
        job_id: Option<&JobId>,
    ) -> ChatResult<Channel> {
        let mut data = Map::new();
        data.insert(
            "members".to_string(),
            json!([members[0].as_str(), members[1].as_str()]),
        );
        if let Some(job) = job_id {
            data.insert("job_id".to_string(), json!(job.as_str()));
        }

        let body = json!({ "data": data, "state": true });
        let raw = self
            .post(&format!("/channels/{CHANNEL_TYPE}/{id}/query"), &body)
            .await?;
        parse_channel_state(&raw)
    }

    async fn send(&self, id: &ConversationId, message: &ChannelMessage) -> ChatResult<()> {
        let body = json!({ "message": message });
        self.post(&format!("/channels/{CHANNEL_TYPE}/{id}/message"), &body)
            .await
            .map(|_| ())
    }
}

impl ChannelBackend for StreamChatClient {
    fn lookup_channel(&self, id: ConversationId) -> ChatFuture<'_, ChatResult<Option<Channel>>> {
        Box::pin(async move { self.lookup(&id).await })
    }

    fn create_channel(
        &self,
        id: ConversationId,
        members: [UserId; 2],
        job_id: Option<JobId>,
    ) -> ChatFuture<'_, ChatResult<Channel>> {
        Box::pin(async move { self.create(&id, &members, job_id.as_ref()).await })
    }

    fn send_message(
        &self,
        id: ConversationId,
        message: ChannelMessage,
    ) -> ChatFuture<'_, ChatResult<()>> {
        Box::pin(async move { self.send(&id, &message).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_state() {
        let state = json!({
            "channel": {
                "id": "u1::u2",
                "type": "messaging",
                "job_id": "job-7",
                "created_at": "2025-05-01T10:00:00Z"
            },
            "members": [
                { "user_id": "u1" },
                { "user_id": "u2" }
            ]
        });
        let channel = parse_channel_state(&state).ok();
        assert_eq!(
            channel.as_ref().map(|c| c.id.as_str()),
            Some("u1::u2")
        );
        assert_eq!(
            channel.as_ref().map(|c| c.members.len()),
            Some(2)
        );
        assert_eq!(
            channel.and_then(|c| c.job_id).as_ref().map(JobId::as_str),
            Some("job-7")
        );
    }

    #[test]
    fn test_parse_channel_state_requires_id() {
        let state = json!({ "channel": { "type": "messaging" } });
        let err = parse_channel_state(&state);
        assert!(matches!(err, Err(ChatError::Decode(_))));
    }
}
