//! Book CRUD orchestration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_database::repositories::book::BookRepository;
use bookly_database::repositories::review::ReviewRepository;
use bookly_database::repositories::tag::TagRepository;
use bookly_entity::book::Book;
use bookly_entity::book::model::{CreateBook, UpdateBook};
use bookly_entity::review::Review;
use bookly_entity::tag::Tag;

use crate::context::RequestContext;

/// A book together with its reviews and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    /// The book row.
    #[serde(flatten)]
    pub book: Book,
    /// Reviews of this book, newest first.
    pub reviews: Vec<Review>,
    /// Tags attached to this book.
    pub tags: Vec<Tag>,
}

/// Handles book catalog operations.
#[derive(Debug, Clone)]
pub struct BookService {
    /// Book repository.
    book_repo: Arc<BookRepository>,
    /// Review repository (for detail assembly).
    review_repo: Arc<ReviewRepository>,
    /// Tag repository (for detail assembly).
    tag_repo: Arc<TagRepository>,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(
        book_repo: Arc<BookRepository>,
        review_repo: Arc<ReviewRepository>,
        tag_repo: Arc<TagRepository>,
    ) -> Self {
        Self {
            book_repo,
            review_repo,
            tag_repo,
        }
    }

    /// Lists all books, newest first.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Book>> {
        self.book_repo.find_all(page).await
    }

    /// Lists books submitted by a specific user.
    pub async fn user_books(&self, user_id: Uuid) -> AppResult<Vec<Book>> {
        self.book_repo.find_by_user(user_id).await
    }

    /// Returns a book with its reviews and tags.
    pub async fn get_detail(&self, book_id: Uuid) -> AppResult<BookDetail> {
        let book = self
            .book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found"))?;

        let reviews = self.review_repo.find_by_book(book_id).await?;
        let tags = self.tag_repo.find_by_book(book_id).await?;

        Ok(BookDetail {
            book,
            reviews,
            tags,
        })
    }

    /// Creates a new book owned by the requesting user.
    pub async fn create(&self, ctx: &RequestContext, data: CreateBook) -> AppResult<Book> {
        let book = self.book_repo.create(&data, ctx.user_id).await?;
        info!(book_id = %book.id, user_id = %ctx.user_id, "Book created");
        Ok(book)
    }

    /// Updates an existing book.
    pub async fn update(&self, book_id: Uuid, data: UpdateBook) -> AppResult<Book> {
        let book = self.book_repo.update(book_id, &data).await?;
        info!(book_id = %book.id, "Book updated");
        Ok(book)
    }

    /// Deletes a book.
    pub async fn delete(&self, book_id: Uuid) -> AppResult<()> {
        if !self.book_repo.delete(book_id).await? {
            return Err(AppError::not_found("Book not found"));
        }
        info!(%book_id, "Book deleted");
        Ok(())
    }
}
