//! Job application routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, JobId, UserAccount, UserId,
};

use super::super::state::AppState;
use super::{ApiError, bad_request, store_error};

/// Fields accepted when applying to a posting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApplyRequest {
    /// Applicant account.
    pub applicant_id: String,
    /// Hosted resume URL.
    pub resume_url: String,
    /// Optional cover letter text.
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Submit an application to a posting.
///
/// A second submission by the same applicant for the same posting is
/// rejected with a conflict instead of creating a duplicate document.
pub(super) async fn apply(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<Application>, ApiError> {
    let job_id = JobId::new(&job_id).map_err(bad_request)?;
    let applicant_id = UserId::new(&request.applicant_id).map_err(bad_request)?;

    let job = state
        .jobs
        .require(&job_id)
        .await
        .map_err(|e| store_error(&e))?;

    let existing = state
        .applications
        .find_existing(&job_id, &applicant_id)
        .await
        .map_err(|e| store_error(&e))?;
    if existing.is_some() {
        return Err((
            axum::http::StatusCode::CONFLICT,
            format!("already applied to job {job_id}"),
        ));
    }

    let now = Utc::now();
    let application = Application {
        id: ApplicationId::generate(),
        job_id,
        recruiter_id: job.recruiter_id,
        applicant_id,
        resume_url: request.resume_url,
        cover_letter: request.cover_letter,
        status: ApplicationStatus::Pending,
        applied_at: now,
        updated_at: now,
    };

    let stored = state
        .applications
        .create(&application)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(application = %stored.id, job = %stored.job_id, "application submitted");
    Ok(Json(stored))
}

/// One application joined with its applicant account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApplicantEntry {
    /// The application.
    pub application: Application,
    /// The applicant account, when still present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserAccount>,
}

/// Applications-for-job payload.
#[derive(Debug, Serialize)]
pub(super) struct ApplicationListResponse {
    /// Matching applications with applicant accounts.
    pub applications: Vec<ApplicantEntry>,
    /// Number of applications.
    pub count: usize,
}

/// List the applications submitted against one posting, with applicants.
pub(super) async fn list_for_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let job_id = JobId::new(&job_id).map_err(bad_request)?;

    let applications = state
        .applications
        .list_by_job(&job_id)
        .await
        .map_err(|e| store_error(&e))?;

    let mut entries = Vec::with_capacity(applications.len());
    for application in applications {
        // A missing applicant document degrades the entry, not the listing.
        let applicant = state
            .users
            .get(&application.applicant_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(applicant = %application.applicant_id, error = %e, "applicant lookup failed");
                None
            });
        entries.push(ApplicantEntry {
            application,
            applicant,
        });
    }

    let count = entries.len();
    Ok(Json(ApplicationListResponse {
        applications: entries,
        count,
    }))
}

/// Listing filter for an applicant's own applications.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApplicantQuery {
    /// The applicant account.
    pub applicant_id: String,
}

/// Own-applications payload.
#[derive(Debug, Serialize)]
pub(super) struct OwnApplicationsResponse {
    /// Applications submitted by the account.
    pub applications: Vec<Application>,
    /// Number of applications.
    pub count: usize,
}

/// List the applications submitted by one account.
pub(super) async fn list_for_applicant(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ApplicantQuery>,
) -> Result<Json<OwnApplicationsResponse>, ApiError> {
    let applicant_id = UserId::new(&query.applicant_id).map_err(bad_request)?;

    let applications = state
        .applications
        .list_by_applicant(&applicant_id)
        .await
        .map_err(|e| store_error(&e))?;

    let count = applications.len();
    Ok(Json(OwnApplicationsResponse {
        applications,
        count,
    }))
}

/// Fields accepted when moving an application to a new review state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatusUpdateRequest {
    /// New review state.
    pub status: ApplicationStatus,
    /// Whether to notify the applicant through chat; defaults to true.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

/// Notifications are on unless explicitly disabled.
const fn default_notify() -> bool {
    true
}

/// Status-update payload.
#[derive(Debug, Serialize)]
pub(super) struct StatusUpdateResponse {
    /// The updated application.
    pub application: Application,
    /// Whether the applicant was notified through chat.
    pub notified: bool,
}

/// Move an application to a new review state and notify the applicant.
///
/// The status write is authoritative; a chat failure downgrades the
/// response's `notified` flag instead of failing the whole update.
pub(super) async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let id = ApplicationId::new(&id).map_err(bad_request)?;

    let application = state
        .applications
        .set_status(&id, request.status, Utc::now())
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(
        application = %application.id,
        status = application.status.as_str(),
        "application status updated"
    );

    let mut notified = false;
    if request.notify {
        let job_title = state
            .jobs
            .get(&application.job_id)
            .await
            .ok()
            .flatten()
            .map(|job| job.title);

        let text = format!(
            "Your application status has been updated to {}",
            application.status.as_str()
        );
        match state
            .chat
            .send_notification(
                &application.recruiter_id,
                &application.applicant_id,
                text,
                job_title,
            )
            .await
        {
            Ok(()) => notified = true,
            Err(e) => {
                tracing::warn!(application = %application.id, error = %e, "status notification failed");
            }
        }
    }

    Ok(Json(StatusUpdateResponse {
        application,
        notified,
    }))
}
