//! Book entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Unique book identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publisher name.
    pub publisher: String,
    /// Publication date.
    pub published_date: NaiveDate,
    /// Number of pages.
    pub page_count: i32,
    /// Language code or name.
    pub language: String,
    /// The user who submitted this book.
    pub user_id: Uuid,
    /// When the book was created.
    pub created_at: DateTime<Utc>,
    /// When the book was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publisher name.
    pub publisher: String,
    /// Publication date.
    pub published_date: NaiveDate,
    /// Number of pages.
    pub page_count: i32,
    /// Language code or name.
    pub language: String,
}

/// Data for updating an existing book. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBook {
    /// New title.
    pub title: Option<String>,
    /// New author name.
    pub author: Option<String>,
    /// New publisher name.
    pub publisher: Option<String>,
    /// New publication date.
    pub published_date: Option<NaiveDate>,
    /// New page count.
    pub page_count: Option<i32>,
    /// New language.
    pub language: Option<String>,
}
