//! Registration and login endpoints

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json};
use crate::domain::user::PublicUser;
use crate::infrastructure::auth::{LoginRequest, RegisterRequest};

/// Create the public authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration body
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
            email: body.email,
        }
    }
}

/// Login body
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

/// Register a new account
///
/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<DataResponse<PublicUser>>, ApiError> {
    let user = state.auth_service.register(body.into()).await?;

    Ok(Json(DataResponse::new(user)))
}

/// Exchange credentials for a session token
///
/// POST /api/v1/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state
        .auth_service
        .login(LoginRequest {
            username: body.username,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at.to_rfc3339(),
    }))
}
