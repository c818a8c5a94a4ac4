//! Application registry handlers.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::error::AppError;
use relay_core::types::ApplicationId;
use relay_entity::application::ApplicationStatus;

use crate::dto::request::{CreateApplicationRequest, UpdateApplicationRequest};
use crate::dto::response::{ApplicationResponse, DeletedResponse};
use crate::error::{ApiError, validate_body};
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let applications = state.application_service.list().await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(req): JsonBody<CreateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    validate_body(&req)?;
    let created = state.application_service.create(req.into()).await?;
    Ok(Json(created.into()))
}

/// PUT /api/applications/{id}
pub async fn update_application(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ApplicationId>,
    JsonBody(req): JsonBody<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    validate_body(&req)?;
    let status = req
        .status
        .as_deref()
        .map(str::parse::<ApplicationStatus>)
        .transpose()
        .map_err(AppError::validation)?;
    let updated = state
        .application_service
        .update(id, req.into_patch(status))
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/applications/{id}
pub async fn delete_application(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ApplicationId>,
) -> Result<Json<DeletedResponse<ApplicationResponse>>, ApiError> {
    let deleted = state.application_service.delete(id).await?;
    Ok(Json(DeletedResponse::of(deleted.into())))
}
