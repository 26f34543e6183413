//! Account management endpoints, all behind the authentication gate

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use tracing::info;

use crate::api::auth::RegisterBody;
use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json};
use crate::domain::user::PublicUser;

/// Create the guarded users router; the caller applies the gate
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", delete(remove_user))
        .route("/me", get(current_user))
}

/// List all accounts
///
/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<DataResponse<Vec<PublicUser>>>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(DataResponse::new(users)))
}

/// Register an account on behalf of the caller
///
/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(body): Json<RegisterBody>,
) -> Result<Json<DataResponse<PublicUser>>, ApiError> {
    let user = state.auth_service.register(body.into()).await?;

    info!(user_id = %user.id, created_by = %principal.user_id(), "User created by another user");

    Ok(Json(DataResponse::new(user)))
}

/// Remove an account other than the caller's own
///
/// DELETE /api/v1/users/{id}
pub async fn remove_user(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<PublicUser>>, ApiError> {
    let target_id: u64 = id
        .parse()
        .map_err(|_| ApiError::bad_request("invalid user id"))?;

    let removed = state.user_service.remove_user(target_id, principal).await?;

    Ok(Json(DataResponse::new(removed)))
}

/// The caller's own account
///
/// GET /api/v1/me
pub async fn current_user(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<DataResponse<PublicUser>>, ApiError> {
    let user = state.user_service.current_user(principal).await?;

    Ok(Json(DataResponse::new(user)))
}
