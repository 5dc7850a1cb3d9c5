//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookly_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the auth extractor after token verification and user
/// resolution, then passed into service methods so that every operation
/// knows *who* is acting and from *which* token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// The user's role as stored in the database.
    pub role: UserRole,
    /// The token ID of the presented access token (revocation key).
    pub jti: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, role: UserRole, jti: Uuid) -> Self {
        Self {
            user_id,
            email,
            role,
            jti,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
