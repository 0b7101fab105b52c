//! Video plumbing routes: tokens and call creation.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InterviewType, UserId};
use crate::video::CallRequest;

use super::super::state::AppState;
use super::chat::TokenRequest;
use super::{ApiError, bad_request, video_error};

/// Video token payload.
#[derive(Debug, Serialize)]
pub(super) struct VideoTokenResponse {
    /// Signed token.
    pub token: String,
}

/// Issue a video token for one account.
pub(super) async fn video_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<VideoTokenResponse>, ApiError> {
    let user_id = UserId::new(&request.user_id).map_err(bad_request)?;
    let token = state
        .video
        .user_token(&user_id)
        .map_err(|e| video_error(&e))?;
    Ok(Json(VideoTokenResponse { token }))
}

/// Call creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCallRequest {
    /// Recruiter creating the call.
    pub recruiter_id: String,
    /// Applicant invited to the call.
    pub applicant_id: String,
    /// Scheduled start time.
    pub scheduled_at: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration: u32,
    /// Interview kind carried as metadata.
    pub interview_type: InterviewType,
}

/// Call creation payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCallResponse {
    /// Freshly minted call id.
    pub call_id: String,
}

/// Create a scheduled call on the video platform.
pub(super) async fn create_call(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCallRequest>,
) -> Result<Json<CreateCallResponse>, ApiError> {
    let recruiter_id = UserId::new(&request.recruiter_id).map_err(bad_request)?;
    let applicant_id = UserId::new(&request.applicant_id).map_err(bad_request)?;

    let call_id = state
        .video
        .create_call(&CallRequest {
            recruiter_id,
            applicant_id,
            scheduled_at: request.scheduled_at,
            duration: request.duration,
            interview_type: request.interview_type,
        })
        .await
        .map_err(|e| video_error(&e))?;

    Ok(Json(CreateCallResponse {
        call_id: call_id.into_string(),
    }))
}
