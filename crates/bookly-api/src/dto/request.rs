//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 8, message = "Username must be 1-8 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email, length(max = 40))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// First name.
    #[validate(length(min = 1, max = 25))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 25))]
    pub last_name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email, length(max = 40))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    /// Email address of the account.
    #[validate(email)]
    pub email: String,
}

/// Password reset confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    /// New password.
    #[validate(length(min = 6))]
    pub new_password: String,
    /// New password, repeated.
    #[validate(length(min = 6))]
    pub confirm_new_password: String,
}

/// Create book request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookRequest {
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Author name.
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    /// Publisher name.
    #[validate(length(min = 1, max = 255))]
    pub publisher: String,
    /// Publication date (YYYY-MM-DD).
    pub published_date: NaiveDate,
    /// Number of pages.
    #[validate(range(min = 1))]
    pub page_count: i32,
    /// Language code or name.
    #[validate(length(min = 1, max = 64))]
    pub language: String,
}

/// Update book request. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookRequest {
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

/// Create review request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// Star rating, 1 through 5.
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    /// Free-form review text.
    #[validate(length(min = 1))]
    pub review_text: String,
}

/// Create or rename tag request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagNameRequest {
    /// Tag name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Attach tags to a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTagsRequest {
    /// Tag names to attach (created if missing).
    pub tags: Vec<String>,
}
