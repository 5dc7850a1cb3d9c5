//! JWT claims structure used in access and refresh tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookly_entity::user::UserRole;

/// The identity sub-object embedded in every token.
///
/// Refresh tokens carry a reduced identity: the role is omitted and
/// re-resolved when the refreshed access token is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    /// Email address of the token holder.
    pub email: String,
    /// Unique user identifier.
    pub user_id: Uuid,
    /// Role at issuance time (absent on refresh tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived token authorizing API calls.
    Access,
    /// Longer-lived token used solely to mint new access tokens.
    Refresh,
}

/// Typed JWT claims payload.
///
/// Every field is required at decode time except `refresh`, which defaults
/// to `false` when absent (access tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The identity this token was issued for.
    pub user: TokenUser,
    /// Unique per-issuance token identifier; the revocation key.
    pub jti: Uuid,
    /// True for refresh tokens.
    #[serde(default)]
    pub refresh: bool,
    /// Absolute expiry instant (seconds since epoch).
    pub exp: i64,
}

impl TokenClaims {
    /// Build fresh claims for the given identity and lifetime.
    pub fn new(user: TokenUser, kind: TokenKind, ttl_seconds: i64) -> Self {
        Self {
            user,
            jti: Uuid::new_v4(),
            refresh: kind == TokenKind::Refresh,
            exp: Utc::now().timestamp() + ttl_seconds,
        }
    }

    /// The kind this token claims to be.
    pub fn kind(&self) -> TokenKind {
        if self.refresh {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    /// Whether this token's expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_jti_per_issuance() {
        let user = TokenUser {
            email: "a@b.c".into(),
            user_id: Uuid::new_v4(),
            role: Some(UserRole::User),
        };
        let c1 = TokenClaims::new(user.clone(), TokenKind::Access, 60);
        let c2 = TokenClaims::new(user, TokenKind::Access, 60);
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn test_kind_follows_refresh_flag() {
        let user = TokenUser {
            email: "a@b.c".into(),
            user_id: Uuid::new_v4(),
            role: None,
        };
        let access = TokenClaims::new(user.clone(), TokenKind::Access, 60);
        let refresh = TokenClaims::new(user, TokenKind::Refresh, 60);
        assert_eq!(access.kind(), TokenKind::Access);
        assert_eq!(refresh.kind(), TokenKind::Refresh);
    }

    #[test]
    fn test_refresh_flag_defaults_to_false() {
        let json = r#"{
            "user": {"email": "a@b.c", "user_id": "7f2c5cc1-7a64-4c6b-ae97-9a4a54a090ba"},
            "jti": "3f7a4ffb-7f50-45bc-9d3f-0f4f29b3f14e",
            "exp": 4102444800
        }"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert!(!claims.refresh);
        assert_eq!(claims.kind(), TokenKind::Access);
        assert!(claims.user.role.is_none());
    }
}
