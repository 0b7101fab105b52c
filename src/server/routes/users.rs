//! Account routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::Deserialize;

use crate::domain::{Role, UserAccount, UserId, UserProfile};

use super::super::state::AppState;
use super::{ApiError, bad_request, store_error};

/// Fields accepted at registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterRequest {
    /// Account id (the auth provider's uid).
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Name shown across the product.
    pub display_name: String,
    /// Avatar URL.
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    /// Account role.
    pub role: Role,
    /// Topics the account follows.
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Store the registration document for a freshly authenticated account.
pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    let id = UserId::new(&request.id).map_err(bad_request)?;

    let account = UserAccount {
        id,
        email: request.email,
        display_name: request.display_name,
        photo_url: request.photo_url,
        role: request.role,
        interests: request.interests,
        profile: None,
        created_at: Utc::now(),
    };

    let stored = state
        .users
        .create(&account)
        .await
        .map_err(|e| store_error(&e))?;
    tracing::info!(user = %stored.id, role = stored.role.as_str(), "account registered");
    Ok(Json(stored))
}

/// Fetch one account.
pub(super) async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserAccount>, ApiError> {
    let id = UserId::new(&id).map_err(bad_request)?;
    let account = state.users.require(&id).await.map_err(|e| store_error(&e))?;
    Ok(Json(account))
}

/// Replace the extended profile of an account.
pub(super) async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserAccount>, ApiError> {
    let id = UserId::new(&id).map_err(bad_request)?;
    let account = state
        .users
        .update_profile(&id, &profile)
        .await
        .map_err(|e| store_error(&e))?;
    Ok(Json(account))
}
