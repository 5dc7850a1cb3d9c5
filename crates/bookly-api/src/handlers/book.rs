//! Book handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use bookly_auth::rbac;
use bookly_core::error::AppError;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_entity::book::Book;
use bookly_entity::book::model::{CreateBook, UpdateBook};
use bookly_entity::user::UserRole;
use bookly_service::book::BookDetail;

use crate::dto::request::{CreateBookRequest, UpdateBookRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles admitted to the book endpoints.
const BOOK_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::User];

/// GET /api/books
pub async fn list_books(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<Book>>, ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;

    let books = state.book_service.list(&page).await?;
    Ok(Json(books))
}

/// GET /api/books/user/{user_id}
pub async fn user_books(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Book>>, ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;

    let books = state.book_service.user_books(user_id).await?;
    Ok(Json(books))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let book = state
        .book_service
        .create(
            auth.context(),
            CreateBook {
                title: req.title,
                author: req.author,
                publisher: req.publisher,
                published_date: req.published_date,
                page_count: req.page_count,
                language: req.language,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/books/{book_id}
pub async fn get_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookDetail>, ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;

    let detail = state.book_service.get_detail(book_id).await?;
    Ok(Json(detail))
}

/// PATCH /api/books/{book_id}
pub async fn update_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(book_id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;

    let book = state
        .book_service
        .update(
            book_id,
            UpdateBook {
                title: req.title,
                author: req.author,
                publisher: req.publisher,
                published_date: req.published_date,
                page_count: req.page_count,
                language: req.language,
            },
        )
        .await?;

    Ok(Json(book))
}

/// DELETE /api/books/{book_id}
pub async fn delete_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(book_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    rbac::require_any(&auth.role, BOOK_ROLES)?;

    state.book_service.delete(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
