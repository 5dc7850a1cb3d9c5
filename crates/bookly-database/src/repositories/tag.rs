//! Tag repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bookly_core::error::{AppError, ErrorKind};
use bookly_core::result::AppResult;
use bookly_entity::tag::Tag;

/// Repository for tag CRUD and book-tag association operations.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tag by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag by id", e))
    }

    /// Find a tag by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tag by name", e)
            })
    }

    /// List all tags, alphabetically.
    pub async fn find_all(&self) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Create a new tag. Duplicate names surface as `Conflict`.
    pub async fn create(&self, name: &str) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("tags_name_key") =>
                {
                    AppError::conflict(format!("Tag '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create tag", e),
            })
    }

    /// Rename an existing tag.
    pub async fn update(&self, id: Uuid, name: &str) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("UPDATE tags SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("tags_name_key") =>
                {
                    AppError::conflict(format!("Tag '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update tag", e),
            })?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))
    }

    /// Delete a tag by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Attach a tag to a book. Idempotent: re-attaching is a no-op.
    pub async fn attach_to_book(&self, book_id: Uuid, tag_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO book_tags (book_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(book_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach tag", e))?;
        Ok(())
    }

    /// List the tags attached to a book, alphabetically.
    pub async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t \
             JOIN book_tags bt ON bt.tag_id = t.id \
             WHERE bt.book_id = $1 ORDER BY t.name ASC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list book tags", e))
    }
}
