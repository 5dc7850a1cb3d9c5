//! Tag handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use bookly_auth::rbac;
use bookly_core::error::AppError;
use bookly_entity::tag::Tag;
use bookly_entity::user::UserRole;

use crate::dto::request::{AddTagsRequest, TagNameRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles admitted to the tag endpoints.
const TAG_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::User];

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Tag>>, ApiError> {
    rbac::require_any(&auth.role, TAG_ROLES)?;

    let tags = state.tag_service.list().await?;
    Ok(Json(tags))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<TagNameRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    rbac::require_any(&auth.role, TAG_ROLES)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tag = state.tag_service.create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// POST /api/tags/book/{book_id}
pub async fn add_tags_to_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(book_id): Path<Uuid>,
    Json(req): Json<AddTagsRequest>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    rbac::require_any(&auth.role, TAG_ROLES)?;

    let tags = state
        .tag_service
        .add_tags_to_book(book_id, &req.tags)
        .await?;
    Ok(Json(tags))
}

/// PUT /api/tags/{tag_id}
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tag_id): Path<Uuid>,
    Json(req): Json<TagNameRequest>,
) -> Result<Json<Tag>, ApiError> {
    rbac::require_any(&auth.role, TAG_ROLES)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tag = state.tag_service.update(tag_id, &req.name).await?;
    Ok(Json(tag))
}

/// DELETE /api/tags/{tag_id}
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tag_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    rbac::require_any(&auth.role, TAG_ROLES)?;

    state.tag_service.delete(tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
