//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookly_entity::book::Book;
use bookly_entity::review::Review;
use bookly_entity::user::User;

/// User summary for responses. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Whether the email has been verified.
    pub is_verified: bool,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_verified: user.is_verified,
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Signup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Human-readable message.
    pub message: String,
    /// The newly created user.
    pub user: UserResponse,
}

/// Reduced user identity echoed back at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    /// Email address.
    pub email: String,
    /// User ID.
    pub id: Uuid,
}

/// Login response carrying both tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable message.
    pub message: String,
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// Reduced user identity.
    pub user: LoginUser,
}

/// Refresh response carrying the new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Fresh access token.
    pub access_token: String,
}

/// Current user with their submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    /// The user record.
    #[serde(flatten)]
    pub user: UserResponse,
    /// Books submitted by this user.
    pub books: Vec<Book>,
    /// Reviews written by this user.
    pub reviews: Vec<Review>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub cache: String,
}
