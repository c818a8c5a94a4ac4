//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;

use relay_auth::{LoginResult, SessionUser};

use crate::dto::request::LoginRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;
    Ok(Json(result))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_manager.logout(&auth.claims).await?;
    Ok(Json(MessageResponse::ok("Logged out successfully")))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(SessionUser {
        email: auth.email.clone(),
        name: auth.name.clone(),
    })
}
