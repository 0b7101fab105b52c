//! Interview scheduling routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationId, Interview, InterviewId, InterviewStatus, InterviewType};
use crate::video::CallRequest;

use super::super::state::AppState;
use super::{ApiError, bad_request, store_error, video_error};

/// Fields accepted when scheduling an interview.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScheduleRequest {
    /// Application the interview belongs to.
    pub application_id: String,
    /// Scheduled start time.
    pub scheduled_at: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration: u32,
    /// How the interview is conducted.
    #[serde(default)]
    pub interview_type: Option<InterviewType>,
    /// Recruiter notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Schedule an interview for an application.
///
/// Video interviews get a call created on the external video platform
/// first; its id is stored on the interview record. The call is created
/// exactly once and never mutated afterwards.
pub(super) async fn schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<Interview>, ApiError> {
    let application_id = ApplicationId::new(&request.application_id).map_err(bad_request)?;

    let application = state
        .applications
        .require(&application_id)
        .await
        .map_err(|e| store_error(&e))?;

    let meeting_url = match request.interview_type {
        Some(InterviewType::Video) => {
            let call = state
                .video
                .create_call(&CallRequest {
                    recruiter_id: application.recruiter_id.clone(),
                    applicant_id: application.applicant_id.clone(),
                    scheduled_at: request.scheduled_at,
                    duration: request.duration,
                    interview_type: InterviewType::Video,
                })
                .await
                .map_err(|e| video_error(&e))?;
            Some(call.into_string())
        }
        _ => None,
    };

    let interview = Interview {
        id: InterviewId::generate(),
        application_id,
        job_id: application.job_id,
        recruiter_id: application.recruiter_id,
        applicant_id: application.applicant_id,
        scheduled_at: request.scheduled_at,
        duration: request.duration,
        status: InterviewStatus::Scheduled,
        meeting_url,
        notes: request.notes,
        interview_type: request.interview_type,
    };

    let stored = state
        .interviews
        .create(&interview)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(interview = %stored.id, application = %stored.application_id, "interview scheduled");
    Ok(Json(stored))
}

/// Interview list payload.
#[derive(Debug, Serialize)]
pub(super) struct InterviewListResponse {
    /// All interviews, most recently scheduled first.
    pub interviews: Vec<Interview>,
    /// Number of interviews.
    pub count: usize,
}

/// List all interviews, most recently scheduled first.
pub(super) async fn list_interviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InterviewListResponse>, ApiError> {
    let interviews = state
        .interviews
        .list_recent()
        .await
        .map_err(|e| store_error(&e))?;
    let count = interviews.len();
    Ok(Json(InterviewListResponse { interviews, count }))
}

/// Fetch one interview.
pub(super) async fn get_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Interview>, ApiError> {
    let id = InterviewId::new(&id).map_err(bad_request)?;
    let interview = state
        .interviews
        .require(&id)
        .await
        .map_err(|e| store_error(&e))?;
    Ok(Json(interview))
}

/// Cancel an interview by removing its document.
pub(super) async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = InterviewId::new(&id).map_err(bad_request)?;
    state
        .interviews
        .delete(&id)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(interview = %id, "interview cancelled");
    Ok(StatusCode::NO_CONTENT)
}
