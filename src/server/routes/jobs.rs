//! Job posting routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    EmploymentType, Job, JobId, JobStatus, LocationType, SalaryRange, UserId,
};

use super::super::state::AppState;
use super::{ApiError, bad_request, store_error};

/// Fields accepted when publishing a posting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateJobRequest {
    /// Recruiter publishing the posting.
    pub recruiter_id: String,
    /// Hiring company name.
    pub company_name: String,
    /// Company logo URL.
    #[serde(default)]
    pub company_logo: Option<String>,
    /// Position title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Advertised location.
    pub location: String,
    /// Remote/hybrid/on-site.
    pub location_type: LocationType,
    /// Contract shape.
    pub employment_type: EmploymentType,
    /// Required skill tags.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Advertised salary range.
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    /// Expiry time.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Initial publication state; defaults to active.
    #[serde(default)]
    pub status: Option<JobStatus>,
}

/// Publish a new posting.
pub(super) async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let recruiter_id = UserId::new(&request.recruiter_id).map_err(bad_request)?;

    let job = Job {
        id: JobId::generate(),
        recruiter_id,
        company_name: request.company_name,
        company_logo: request.company_logo,
        title: request.title,
        description: request.description,
        location: request.location,
        location_type: request.location_type,
        employment_type: request.employment_type,
        skills: request.skills,
        salary: request.salary,
        posted_at: Utc::now(),
        expires_at: request.expires_at,
        status: request.status.unwrap_or(JobStatus::Active),
    };

    let stored = state.jobs.create(&job).await.map_err(|e| store_error(&e))?;
    tracing::info!(job = %stored.id, "job posting published");
    Ok(Json(stored))
}

/// Listing filters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobListQuery {
    /// Restrict to one recruiter's postings.
    #[serde(default)]
    pub recruiter_id: Option<String>,
    /// Restrict to one publication state.
    #[serde(default)]
    pub status: Option<JobStatus>,
}

/// Posting list payload.
#[derive(Debug, Serialize)]
pub(super) struct JobListResponse {
    /// Matching postings.
    pub jobs: Vec<Job>,
    /// Number of postings.
    pub count: usize,
}

/// List postings, optionally filtered by recruiter and status.
pub(super) async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    let mut jobs = match &query.recruiter_id {
        Some(raw) => {
            let recruiter_id = UserId::new(raw).map_err(bad_request)?;
            state
                .jobs
                .list_by_recruiter(&recruiter_id)
                .await
                .map_err(|e| store_error(&e))?
        }
        None if query.status == Some(JobStatus::Active) => {
            state.jobs.list_active().await.map_err(|e| store_error(&e))?
        }
        None => state.jobs.list_all().await.map_err(|e| store_error(&e))?,
    };

    if let Some(status) = query.status {
        jobs.retain(|job| job.status == status);
    }

    let count = jobs.len();
    Ok(Json(JobListResponse { jobs, count }))
}

/// Fetch one posting.
pub(super) async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let id = JobId::new(&id).map_err(bad_request)?;
    let job = state.jobs.require(&id).await.map_err(|e| store_error(&e))?;
    Ok(Json(job))
}

/// Patch the named fields of a posting (edit, close, reopen).
pub(super) async fn update_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Job>, ApiError> {
    let id = JobId::new(&id).map_err(bad_request)?;

    let Some(fields) = patch.as_object() else {
        return Err(bad_request("patch body must be a JSON object"));
    };
    if fields.is_empty() {
        return Err(bad_request("patch body must name at least one field"));
    }
    if fields.contains_key("id") {
        return Err(bad_request("the id field cannot be updated"));
    }

    let job = state
        .jobs
        .update(&id, &patch)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(job = %job.id, status = job.status.as_str(), "job posting updated");
    Ok(Json(job))
}
