//! Tag CRUD and book-tag association.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_database::repositories::book::BookRepository;
use bookly_database::repositories::tag::TagRepository;
use bookly_entity::tag::Tag;

/// Handles tag operations.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tag_repo: Arc<TagRepository>,
    /// Book repository (existence checks).
    book_repo: Arc<BookRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>, book_repo: Arc<BookRepository>) -> Self {
        Self {
            tag_repo,
            book_repo,
        }
    }

    /// Lists all tags alphabetically.
    pub async fn list(&self) -> AppResult<Vec<Tag>> {
        self.tag_repo.find_all().await
    }

    /// Creates a new tag. Duplicate names surface as `Conflict`.
    pub async fn create(&self, name: &str) -> AppResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        let tag = self.tag_repo.create(name).await?;
        info!(tag_id = %tag.id, "Tag created");
        Ok(tag)
    }

    /// Renames an existing tag.
    pub async fn update(&self, tag_id: Uuid, name: &str) -> AppResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        self.tag_repo.update(tag_id, name).await
    }

    /// Deletes a tag.
    pub async fn delete(&self, tag_id: Uuid) -> AppResult<()> {
        if !self.tag_repo.delete(tag_id).await? {
            return Err(AppError::not_found("Tag not found"));
        }
        info!(%tag_id, "Tag deleted");
        Ok(())
    }

    /// Attaches a set of tags to a book, creating any that do not exist
    /// yet. Returns the book's full tag list.
    pub async fn add_tags_to_book(
        &self,
        book_id: Uuid,
        tag_names: &[String],
    ) -> AppResult<Vec<Tag>> {
        if self.book_repo.find_by_id(book_id).await?.is_none() {
            return Err(AppError::not_found("Book not found"));
        }

        for name in tag_names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let tag = match self.tag_repo.find_by_name(name).await? {
                Some(tag) => tag,
                None => self.tag_repo.create(name).await?,
            };
            self.tag_repo.attach_to_book(book_id, tag.id).await?;
        }

        self.tag_repo.find_by_book(book_id).await
    }
}
