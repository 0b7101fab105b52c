//! Video-call platform client.
//!
//! Write-only from this backend's perspective: a call is created once at
//! interview-scheduling time and never mutated afterwards. Credentials are
//! shared with the chat platform; only the endpoint differs.

use serde_json::{Value, json};
use thiserror::Error;
use url::Url;

use chrono::{DateTime, Utc};

use crate::chat::token;
use crate::config::StreamConfig;
use crate::domain::{CallId, InterviewType, UserId};

/// Call type used for all scheduled interviews.
const CALL_TYPE: &str = "default";

/// Errors that can occur during video operations.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The video platform could not be reached or answered with a failure.
    #[error("video platform unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL building error.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for VideoError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

/// Convenience result alias for video operations.
pub type VideoResult<T> = Result<T, VideoError>;

/// Everything needed to create one scheduled call.
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Recruiter creating and administering the call.
    pub recruiter_id: UserId,
    /// Applicant invited to the call.
    pub applicant_id: UserId,
    /// Scheduled start time.
    pub scheduled_at: DateTime<Utc>,
    /// Planned duration in minutes, carried as display metadata.
    pub duration: u32,
    /// Interview kind, carried as display metadata.
    pub interview_type: InterviewType,
}

/// Build the creation payload for one call.
///
/// The recruiter is the call creator and its admin member; duration and
/// interview kind travel as free-form custom metadata.
#[must_use]
pub fn build_call_payload(request: &CallRequest) -> Value {
    json!({
        "data": {
            "created_by_id": request.recruiter_id.as_str(),
            "members": [
                { "user_id": request.recruiter_id.as_str(), "role": "admin" },
                { "user_id": request.applicant_id.as_str() }
            ],
            "starts_at": request.scheduled_at,
            "custom": {
                "duration": request.duration,
                "interviewType": request.interview_type
            }
        }
    })
}

/// Facade over the video platform, owned by the application state.
pub struct VideoService {
    client: reqwest::Client,
    config: StreamConfig,
}

impl VideoService {
    /// Build the platform connection handle.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(config: StreamConfig) -> VideoResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Issue a signed token for one account (same signing as chat).
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn user_token(&self, user_id: &UserId) -> VideoResult<String> {
        token::user_token(&self.config, user_id).map_err(|e| VideoError::Token(e.to_string()))
    }

    /// Create one scheduled call and return its freshly minted id.
    ///
    /// # Errors
    /// Returns an error if the platform cannot be reached or rejects the
    /// create; no id is handed out in that case.
    pub async fn create_call(&self, request: &CallRequest) -> VideoResult<CallId> {
        let call_id = CallId::generate();
        let mut url = Url::parse(&format!(
            "{}/api/v2/video/call/{CALL_TYPE}/{call_id}",
            self.config.video_base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut().append_pair("api_key", &self.config.api_key);

        let auth =
            token::server_token(&self.config).map_err(|e| VideoError::Token(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .header("Authorization", auth)
            .header("stream-auth-type", "jwt")
            .json(&build_call_payload(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VideoError::UpstreamUnavailable(format!(
                "status {status}: {message}"
            )));
        }

        tracing::info!(call = %call_id, "video call created");
        Ok(call_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Option<CallRequest> {
        let recruiter = UserId::new("rec-1").ok()?;
        let applicant = UserId::new("app-1").ok()?;
        let scheduled_at = "2025-06-01T14:00:00Z".parse().ok()?;
        Some(CallRequest {
            recruiter_id: recruiter,
            applicant_id: applicant,
            scheduled_at,
            duration: 45,
            interview_type: InterviewType::Video,
        })
    }

    #[test]
    fn test_call_payload_shape() {
        let payload = request().map(|r| build_call_payload(&r));
        assert!(payload.is_some());
        let payload = payload.unwrap_or_default();

        assert_eq!(
            payload.pointer("/data/created_by_id"),
            Some(&json!("rec-1"))
        );
        assert_eq!(
            payload.pointer("/data/members/0/role"),
            Some(&json!("admin"))
        );
        assert_eq!(
            payload.pointer("/data/members/1/user_id"),
            Some(&json!("app-1"))
        );
        assert_eq!(
            payload.pointer("/data/custom/interviewType"),
            Some(&json!("video"))
        );
        assert_eq!(payload.pointer("/data/custom/duration"), Some(&json!(45)));
    }
}
