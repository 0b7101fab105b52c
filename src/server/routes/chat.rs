//! Chat plumbing routes: tokens, identities, conversations, notifications.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::chat::{Channel, ChatUser};
use crate::domain::{JobId, UserId};

use super::super::state::AppState;
use super::{ApiError, bad_request, chat_error};

/// Token request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TokenRequest {
    /// Account the token is issued for.
    pub user_id: String,
}

/// Token payload.
#[derive(Debug, Serialize)]
pub(super) struct TokenResponse {
    /// Signed token.
    pub token: String,
}

/// Issue a chat token for one account.
pub(super) async fn chat_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user_id = UserId::new(&request.user_id).map_err(bad_request)?;
    let token = state
        .chat
        .user_token(&user_id)
        .map_err(|e| chat_error(&e))?;
    Ok(Json(TokenResponse { token }))
}

/// Identity upsert request.
#[derive(Debug, Deserialize)]
pub(super) struct UpsertUserRequest {
    /// Account id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Product role, forwarded as metadata.
    #[serde(default)]
    pub role: Option<String>,
}

/// Acknowledgement payload.
#[derive(Debug, Serialize)]
pub(super) struct AckResponse {
    /// Whether the operation completed.
    pub success: bool,
}

/// Create or update the messaging identity of one account.
pub(super) async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpsertUserRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let id = UserId::new(&request.id).map_err(bad_request)?;
    let user = ChatUser {
        id,
        name: request.name,
        image: request.image,
        role: request.role,
    };
    state
        .chat
        .upsert_user(&user)
        .await
        .map_err(|e| chat_error(&e))?;
    Ok(Json(AckResponse { success: true }))
}

/// Conversation resolution request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResolveRequest {
    /// One participant.
    pub participant_a: String,
    /// The other participant.
    pub participant_b: String,
    /// Optional topic reference attached at creation, not part of identity.
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Resolve the conversation between two participants, creating it on first
/// contact.
pub(super) async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<Channel>, ApiError> {
    let a = UserId::new(&request.participant_a).map_err(bad_request)?;
    let b = UserId::new(&request.participant_b).map_err(bad_request)?;
    let job_id = match &request.job_id {
        Some(raw) => Some(JobId::new(raw).map_err(bad_request)?),
        None => None,
    };

    let channel = state
        .chat
        .resolve_conversation(&a, &b, job_id.as_ref())
        .await
        .map_err(|e| chat_error(&e))?;
    Ok(Json(channel))
}

/// Notification request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NotifyRequest {
    /// Sending account.
    pub sender_id: String,
    /// Receiving account.
    pub receiver_id: String,
    /// Message body.
    pub message: String,
    /// Posting title carried for display.
    #[serde(default)]
    pub job_title: Option<String>,
}

/// Resolve the pair's conversation and append one notification message.
pub(super) async fn notify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let sender = UserId::new(&request.sender_id).map_err(bad_request)?;
    let receiver = UserId::new(&request.receiver_id).map_err(bad_request)?;

    state
        .chat
        .send_notification(&sender, &receiver, request.message, request.job_title)
        .await
        .map_err(|e| chat_error(&e))?;
    Ok(Json(AckResponse { success: true }))
}
