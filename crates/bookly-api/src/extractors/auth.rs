//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, resolves the live user record, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bookly_auth::jwt::claims::TokenKind;
use bookly_core::error::AppError;
use bookly_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A missing or malformed header is a client error distinct from a
        // failed token verification.
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.token_service.verify(token, TokenKind::Access).await?;

        // The gate fails closed: a token for a deleted account is useless.
        let user = state
            .user_repo
            .find_by_email(&claims.user.email)
            .await?
            .ok_or_else(|| AppError::forbidden("User account no longer exists"))?;

        let ctx = RequestContext::new(user.id, user.email, user.role, claims.jti);

        Ok(AuthUser(ctx))
    }
}
