//! `AuthUser` extractor: pulls the session token from the request, validates
//! it, and injects the caller's context.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;

use relay_auth::Claims;
use relay_core::error::AppError;
use relay_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Query fallback for clients that cannot set headers (EventSource).
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Who is acting.
    pub context: RequestContext,
    /// Validated token claims, needed for logout.
    pub claims: Claims,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| query_token(parts))
            .ok_or_else(|| AppError::authentication("Not authenticated"))?;

        let claims = state.session_manager.validate(&token).await?;
        let context = RequestContext::new(claims.email(), claims.name.clone());

        Ok(AuthUser { context, claims })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn query_token(parts: &Parts) -> Option<String> {
    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty())
}
