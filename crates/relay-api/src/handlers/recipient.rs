//! Recipient management handlers.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::types::RecipientId;
use relay_entity::recipient::Recipient;

use crate::dto::request::{CreateRecipientRequest, UpdateRecipientRequest};
use crate::dto::response::{DeletedResponse, RecipientSummary};
use crate::error::{ApiError, validate_body};
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/recipients
pub async fn list_recipients(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Recipient>>, ApiError> {
    Ok(Json(state.recipient_service.list().await?))
}

/// POST /api/recipients
pub async fn create_recipient(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(req): JsonBody<CreateRecipientRequest>,
) -> Result<Json<Recipient>, ApiError> {
    validate_body(&req)?;
    Ok(Json(state.recipient_service.create(req.into()).await?))
}

/// PUT /api/recipients/{id}
pub async fn update_recipient(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<RecipientId>,
    JsonBody(req): JsonBody<UpdateRecipientRequest>,
) -> Result<Json<Recipient>, ApiError> {
    validate_body(&req)?;
    Ok(Json(state.recipient_service.update(id, req.into()).await?))
}

/// DELETE /api/recipients/{id}
pub async fn delete_recipient(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<RecipientId>,
) -> Result<Json<DeletedResponse<RecipientSummary>>, ApiError> {
    let deleted = state.recipient_service.delete(id).await?;
    Ok(Json(DeletedResponse::of(deleted.into())))
}
