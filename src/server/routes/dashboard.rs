//! Role-dispatched dashboard route.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use futures::future::join_all;

use crate::domain::{
    ApplicationWithJob, DashboardView, Job, JobWithApplications, Role, UserId,
};

use super::super::state::AppState;
use super::{ApiError, bad_request, store_error};

/// Build the dashboard for one account.
///
/// The role is dispatched here, exactly once; each arm assembles its own
/// variant. Aggregates are best-effort re-queries: a failed count degrades
/// to zero rather than failing the whole dashboard.
pub(super) async fn view(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let user_id = UserId::new(&user_id).map_err(bad_request)?;
    let account = state
        .users
        .require(&user_id)
        .await
        .map_err(|e| store_error(&e))?;

    let view = match account.role {
        Role::Recruiter => recruiter_view(&state, &account.id).await?,
        Role::JobSeeker => job_seeker_view(&state, &account.id).await?,
    };
    Ok(Json(view))
}

/// Recruiter arm: own postings with per-posting application counts.
async fn recruiter_view(
    state: &Arc<AppState>,
    recruiter_id: &UserId,
) -> Result<DashboardView, ApiError> {
    let jobs = state
        .jobs
        .list_by_recruiter(recruiter_id)
        .await
        .map_err(|e| store_error(&e))?;

    let counts = join_all(jobs.iter().map(|job| count_applications(state, job))).await;

    let jobs = jobs
        .into_iter()
        .zip(counts)
        .map(|(job, application_count)| JobWithApplications {
            job,
            application_count,
        })
        .collect();

    Ok(DashboardView::Recruiter { jobs })
}

/// Count the applications for one posting, degrading to zero on failure.
async fn count_applications(state: &Arc<AppState>, job: &Job) -> usize {
    match state.applications.list_by_job(&job.id).await {
        Ok(applications) => applications.len(),
        Err(e) => {
            tracing::warn!(job = %job.id, error = %e, "application count failed");
            0
        }
    }
}

/// Job-seeker arm: own applications joined with their postings.
async fn job_seeker_view(
    state: &Arc<AppState>,
    applicant_id: &UserId,
) -> Result<DashboardView, ApiError> {
    let applications = state
        .applications
        .list_by_applicant(applicant_id)
        .await
        .map_err(|e| store_error(&e))?;

    let jobs = join_all(applications.iter().map(|application| async {
        state
            .jobs
            .get(&application.job_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(job = %application.job_id, error = %e, "job lookup failed");
                None
            })
    }))
    .await;

    let applications = applications
        .into_iter()
        .zip(jobs)
        .map(|(application, job)| ApplicationWithJob { application, job })
        .collect();

    Ok(DashboardView::JobSeeker { applications })
}
