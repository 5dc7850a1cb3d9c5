//! Book repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bookly_core::error::{AppError, ErrorKind};
use bookly_core::result::AppResult;
use bookly_core::types::pagination::{PageRequest, PageResponse};
use bookly_entity::book::Book;
use bookly_entity::book::model::{CreateBook, UpdateBook};

/// Repository for book CRUD and query operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a book by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find book by id", e))
    }

    /// List all books, newest first, with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Book>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count books", e))?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list books", e))?;

        Ok(PageResponse::new(
            books,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List books submitted by a specific user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user books", e))
    }

    /// Create a new book owned by the given user.
    pub async fn create(&self, data: &CreateBook, user_id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author, publisher, published_date, page_count, language, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.publisher)
        .bind(data.published_date)
        .bind(data.page_count)
        .bind(&data.language)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create book", e))
    }

    /// Update a book's fields. `None` fields are left unchanged.
    pub async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET title = COALESCE($2, title), \
                              author = COALESCE($3, author), \
                              publisher = COALESCE($4, publisher), \
                              published_date = COALESCE($5, published_date), \
                              page_count = COALESCE($6, page_count), \
                              language = COALESCE($7, language), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.publisher)
        .bind(data.published_date)
        .bind(data.page_count)
        .bind(&data.language)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update book", e))?
        .ok_or_else(|| AppError::not_found(format!("Book {id} not found")))
    }

    /// Delete a book by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete book", e))?;

        Ok(result.rows_affected() > 0)
    }
}
