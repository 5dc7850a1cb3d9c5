//! Review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use bookly_auth::rbac;
use bookly_core::error::AppError;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_entity::review::Review;
use bookly_entity::review::model::CreateReview;
use bookly_entity::user::UserRole;

use crate::dto::request::CreateReviewRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles admitted to the review endpoints.
const REVIEW_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::User];
/// Listing every review is an admin operation.
const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// POST /api/reviews/book/{book_id}
pub async fn add_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(book_id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    rbac::require_any(&auth.role, REVIEW_ROLES)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let review = state
        .review_service
        .add_to_book(
            auth.context(),
            book_id,
            CreateReview {
                rating: req.rating,
                review_text: req.review_text,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<Review>>, ApiError> {
    rbac::require_any(&auth.role, ADMIN_ONLY)?;

    let reviews = state.review_service.list(&page).await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/{review_id}
pub async fn get_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<Json<Review>, ApiError> {
    rbac::require_any(&auth.role, REVIEW_ROLES)?;

    let review = state.review_service.get(review_id).await?;
    Ok(Json(review))
}

/// DELETE /api/reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    rbac::require_any(&auth.role, REVIEW_ROLES)?;

    state
        .review_service
        .delete(auth.context(), review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
