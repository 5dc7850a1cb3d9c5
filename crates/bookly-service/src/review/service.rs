//! Review creation, listing, and ownership-checked deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_database::repositories::book::BookRepository;
use bookly_database::repositories::review::ReviewRepository;
use bookly_entity::review::Review;
use bookly_entity::review::model::CreateReview;

use crate::context::RequestContext;

/// Handles review operations.
#[derive(Debug, Clone)]
pub struct ReviewService {
    /// Review repository.
    review_repo: Arc<ReviewRepository>,
    /// Book repository (existence checks).
    book_repo: Arc<BookRepository>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(review_repo: Arc<ReviewRepository>, book_repo: Arc<BookRepository>) -> Self {
        Self {
            review_repo,
            book_repo,
        }
    }

    /// Adds a review to a book on behalf of the requesting user.
    pub async fn add_to_book(
        &self,
        ctx: &RequestContext,
        book_id: Uuid,
        data: CreateReview,
    ) -> AppResult<Review> {
        if !(1..=5).contains(&data.rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        if self.book_repo.find_by_id(book_id).await?.is_none() {
            return Err(AppError::not_found("Book not found"));
        }

        let review = self.review_repo.create(&data, ctx.user_id, book_id).await?;
        info!(review_id = %review.id, %book_id, "Review added");
        Ok(review)
    }

    /// Lists all reviews, newest first.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Review>> {
        self.review_repo.find_all(page).await
    }

    /// Lists the reviews written by a specific user.
    pub async fn user_reviews(&self, user_id: Uuid) -> AppResult<Vec<Review>> {
        self.review_repo.find_by_user(user_id).await
    }

    /// Returns a single review.
    pub async fn get(&self, review_id: Uuid) -> AppResult<Review> {
        self.review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))
    }

    /// Deletes a review. Only the review's author may delete it.
    pub async fn delete(&self, ctx: &RequestContext, review_id: Uuid) -> AppResult<()> {
        let review = self.get(review_id).await?;

        if review.user_id != ctx.user_id {
            return Err(AppError::forbidden("Cannot delete another user's review"));
        }

        self.review_repo.delete(review_id).await?;
        info!(%review_id, "Review deleted");
        Ok(())
    }
}
