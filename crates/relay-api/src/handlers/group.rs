//! Group management handlers.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::types::GroupId;
use relay_entity::group::Group;
use relay_service::group::GroupListing;

use crate::dto::request::{CreateGroupRequest, UpdateGroupRequest};
use crate::dto::response::DeletedResponse;
use crate::error::{ApiError, validate_body};
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<GroupListing>>, ApiError> {
    Ok(Json(state.group_service.list().await?))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(req): JsonBody<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    validate_body(&req)?;
    Ok(Json(state.group_service.create(req.into()).await?))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<GroupId>,
    JsonBody(req): JsonBody<UpdateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    validate_body(&req)?;
    Ok(Json(state.group_service.update(id, req.into()).await?))
}

/// DELETE /api/groups/{id}
///
/// Recipients in the group are left without one.
pub async fn delete_group(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<GroupId>,
) -> Result<Json<DeletedResponse<Group>>, ApiError> {
    let deleted = state.group_service.delete(id).await?;
    Ok(Json(DeletedResponse::of(deleted)))
}
