//! Request authentication gate using JWT session tokens

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::Principal;

/// Gate for guarded routes.
///
/// Rejections short-circuit with 401 before the handler runs; on admission
/// the `Principal` is attached to the request extensions.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copy: the request body is not Sync, so no borrow may cross the await
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned))
        .transpose()
        .map_err(|_| ApiError::unauthorized("invalid token format"))?;

    let principal = state
        .auth_service
        .authenticate(authorization.as_deref())
        .await?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extractor for the principal admitted by [`require_user`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("current user not found"))
    }
}
