//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-submitted review of a book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// Star rating, 1 through 5.
    pub rating: i32,
    /// Free-form review text.
    pub review_text: String,
    /// The reviewing user.
    pub user_id: Uuid,
    /// The reviewed book.
    pub book_id: Uuid,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    /// Star rating, 1 through 5.
    pub rating: i32,
    /// Free-form review text.
    pub review_text: String,
}
