//! Review repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bookly_core::error::{AppError, ErrorKind};
use bookly_core::result::AppResult;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_entity::review::Review;
use bookly_entity::review::model::CreateReview;

/// Repository for review CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a review by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find review by id", e)
            })
    }

    /// List all reviews, newest first, with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reviews", e)
            })?;

        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))?;

        Ok(PageResponse::new(
            reviews,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the reviews of a specific book, newest first.
    pub async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE book_id = $1 ORDER BY created_at DESC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list book reviews", e))
    }

    /// List the reviews written by a specific user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user reviews", e))
    }

    /// Create a new review for a book by a user.
    pub async fn create(
        &self,
        data: &CreateReview,
        user_id: Uuid,
        book_id: Uuid,
    ) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (rating, review_text, user_id, book_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.rating)
        .bind(&data.review_text)
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create review", e))
    }

    /// Delete a review by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete review", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
