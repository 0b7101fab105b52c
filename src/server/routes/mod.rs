//! HTTP route handlers for the HireFlow backend API.

mod applications;
mod chat;
mod dashboard;
mod interviews;
mod jobs;
mod users;
mod video;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::chat::ChatError;
use crate::store::StoreError;
use crate::video::VideoError;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/jobs", post(jobs::create_job).get(jobs::list_jobs))
        .route("/api/jobs/{id}", get(jobs::get_job).patch(jobs::update_job))
        .route(
            "/api/jobs/{id}/applications",
            post(applications::apply).get(applications::list_for_job),
        )
        .route("/api/applications", get(applications::list_for_applicant))
        .route(
            "/api/applications/{id}",
            axum::routing::patch(applications::update_status),
        )
        .route(
            "/api/interviews",
            post(interviews::schedule).get(interviews::list_interviews),
        )
        .route(
            "/api/interviews/{id}",
            get(interviews::get_interview).delete(interviews::cancel),
        )
        .route("/api/users", post(users::register))
        .route(
            "/api/users/{id}",
            get(users::get_user).patch(users::update_profile),
        )
        .route("/api/dashboard/{user_id}", get(dashboard::view))
        .route("/api/chat/token", post(chat::chat_token))
        .route("/api/chat/users", post(chat::upsert_user))
        .route("/api/conversations", post(chat::resolve))
        .route("/api/notifications", post(chat::notify))
        .route("/api/video/token", post(video::video_token))
        .route("/api/video/calls", post(video::create_call))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "hireflow",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Error tuple returned by all handlers.
pub(crate) type ApiError = (StatusCode, String);

/// Map store failures onto HTTP statuses.
pub(crate) fn store_error(err: &StoreError) -> ApiError {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        StoreError::AlreadyExists { .. } => (StatusCode::CONFLICT, err.to_string()),
        StoreError::Upstream { .. } => (StatusCode::BAD_GATEWAY, format!("Store error: {err}")),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Store error: {err}"),
        ),
    }
}

/// Map messaging failures onto HTTP statuses.
pub(crate) fn chat_error(err: &ChatError) -> ApiError {
    match err {
        ChatError::InvalidParticipants(_) | ChatError::IdentifierCollision { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        ChatError::UpstreamUnavailable(_) => {
            (StatusCode::BAD_GATEWAY, format!("Chat error: {err}"))
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Chat error: {err}"),
        ),
    }
}

/// Map video failures onto HTTP statuses.
pub(crate) fn video_error(err: &VideoError) -> ApiError {
    match err {
        VideoError::UpstreamUnavailable(_) => {
            (StatusCode::BAD_GATEWAY, format!("Video error: {err}"))
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Video error: {err}"),
        ),
    }
}

/// A caller-side input error.
pub(crate) fn bad_request(message: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, message.to_string())
}
