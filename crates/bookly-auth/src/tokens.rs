//! Access and refresh token issuance and verification.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use bookly_cache::CacheManager;
use bookly_core::config::auth::AuthConfig;
use bookly_core::error::AppError;
use bookly_core::result::AppResult;

use crate::blocklist::TokenBlocklist;
use crate::jwt::claims::{TokenClaims, TokenKind, TokenUser};
use crate::jwt::codec::{INVALID_TOKEN_MSG, JwtCodec};

const SECONDS_PER_DAY: i64 = 86400;

/// Issues and verifies access/refresh tokens.
///
/// One `verify` function parametrized by the expected [`TokenKind`] covers
/// both token families. A token moves through exactly one lifecycle:
/// Issued → Valid → {Expired | Revoked}; both terminal states are absorbing
/// and produce the same externally observable error.
#[derive(Debug, Clone)]
pub struct TokenService {
    /// Signed token codec.
    codec: JwtCodec,
    /// Revocation store consulted on every verification.
    blocklist: TokenBlocklist,
    /// Access token lifetime in seconds.
    access_ttl_seconds: i64,
    /// Refresh token lifetime in seconds.
    refresh_ttl_seconds: i64,
}

impl TokenService {
    /// Builds the token service from configuration and the shared cache.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> AppResult<Self> {
        let codec = JwtCodec::new(&config.jwt_secret, &config.jwt_algorithm)?;
        let blocklist = TokenBlocklist::new(cache, config.revocation_ttl_seconds);

        Ok(Self {
            codec,
            blocklist,
            access_ttl_seconds: config.access_ttl_seconds as i64,
            refresh_ttl_seconds: config.refresh_ttl_days as i64 * SECONDS_PER_DAY,
        })
    }

    /// Issues a short-lived access token carrying the full identity.
    pub fn issue_access_token(&self, user: &TokenUser) -> AppResult<String> {
        let claims = TokenClaims::new(user.clone(), TokenKind::Access, self.access_ttl_seconds);
        self.codec.encode(&claims)
    }

    /// Issues a refresh token carrying a reduced identity (no role).
    pub fn issue_refresh_token(&self, user: &TokenUser) -> AppResult<String> {
        let reduced = TokenUser {
            email: user.email.clone(),
            user_id: user.user_id,
            role: None,
        };
        let claims = TokenClaims::new(reduced, TokenKind::Refresh, self.refresh_ttl_seconds);
        self.codec.encode(&claims)
    }

    /// Verifies a presented token against the codec and the revocation store.
    ///
    /// Fails with the uniform invalid-token error when the codec rejects the
    /// token, when its kind does not match `expected`, or when its `jti` has
    /// been revoked.
    pub async fn verify(&self, token: &str, expected: TokenKind) -> AppResult<TokenClaims> {
        let claims = self.codec.decode(token)?;

        if claims.kind() != expected {
            warn!(jti = %claims.jti, "Token kind mismatch during verification");
            return Err(AppError::invalid_token(INVALID_TOKEN_MSG));
        }

        if self.blocklist.is_revoked(claims.jti).await? {
            warn!(jti = %claims.jti, "Revoked token presented");
            return Err(AppError::invalid_token(INVALID_TOKEN_MSG));
        }

        Ok(claims)
    }

    /// Revokes a token ID (logout). Only the presented token is revoked;
    /// any outstanding refresh token for the same user stays valid until
    /// its own expiry.
    pub async fn revoke(&self, jti: Uuid) -> AppResult<()> {
        self.blocklist.revoke(jti).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookly_cache::memory::MemoryCacheProvider;
    use bookly_core::config::cache::MemoryCacheConfig;
    use bookly_core::error::ErrorKind;
    use bookly_entity::user::UserRole;

    fn service() -> TokenService {
        let provider = MemoryCacheProvider::new(
            &MemoryCacheConfig {
                max_capacity: 100,
                time_to_live_seconds: 3600,
            },
            3600,
        );
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let config = AuthConfig {
            jwt_secret: "unit-test-secret-with-enough-entropy".to_string(),
            jwt_algorithm: "HS256".to_string(),
            access_ttl_seconds: 3600,
            refresh_ttl_days: 2,
            revocation_ttl_seconds: 3600,
            verification_max_age_seconds: 86400,
        };
        TokenService::new(&config, cache).unwrap()
    }

    fn identity() -> TokenUser {
        TokenUser {
            email: "reader@bookly.dev".into(),
            user_id: Uuid::new_v4(),
            role: Some(UserRole::User),
        }
    }

    #[tokio::test]
    async fn test_issue_then_verify_access() {
        let service = service();
        let user = identity();

        let token = service.issue_access_token(&user).unwrap();
        let claims = service.verify(&token, TokenKind::Access).await.unwrap();

        assert_eq!(claims.user.email, user.email);
        assert_eq!(claims.user.user_id, user.user_id);
        assert_eq!(claims.user.role, Some(UserRole::User));
        assert!(!claims.refresh);
    }

    #[tokio::test]
    async fn test_refresh_token_drops_role() {
        let service = service();
        let token = service.issue_refresh_token(&identity()).unwrap();
        let claims = service.verify(&token, TokenKind::Refresh).await.unwrap();
        assert!(claims.refresh);
        assert!(claims.user.role.is_none());
    }

    #[tokio::test]
    async fn test_kind_mismatch_rejected_both_ways() {
        let service = service();
        let user = identity();

        let access = service.issue_access_token(&user).unwrap();
        let refresh = service.issue_refresh_token(&user).unwrap();

        let err = service.verify(&access, TokenKind::Refresh).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);

        let err = service.verify(&refresh, TokenKind::Access).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_revoked_token_rejected_before_expiry() {
        let service = service();
        let token = service.issue_access_token(&identity()).unwrap();

        let claims = service.verify(&token, TokenKind::Access).await.unwrap();
        assert!(!claims.is_expired());

        service.revoke(claims.jti).await.unwrap();

        let err = service.verify(&token, TokenKind::Access).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(err.message, INVALID_TOKEN_MSG);
    }

    #[tokio::test]
    async fn test_expired_token_rejected_regardless_of_revocation() {
        let service = service();

        // Forge claims that expired a minute ago and sign them with the
        // service's own codec.
        let mut claims = TokenClaims::new(identity(), TokenKind::Access, 3600);
        claims.exp = chrono::Utc::now().timestamp() - 60;
        let token = service.codec.encode(&claims).unwrap();

        let err = service.verify(&token, TokenKind::Access).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[tokio::test]
    async fn test_revocation_failure_is_uniform_error() {
        let service = service();
        let user = identity();

        // Two independent issuances never share a jti.
        let t1 = service.issue_access_token(&user).unwrap();
        let t2 = service.issue_access_token(&user).unwrap();
        let c1 = service.verify(&t1, TokenKind::Access).await.unwrap();
        let c2 = service.verify(&t2, TokenKind::Access).await.unwrap();
        assert_ne!(c1.jti, c2.jti);

        // Revoking one leaves the other valid.
        service.revoke(c1.jti).await.unwrap();
        assert!(service.verify(&t1, TokenKind::Access).await.is_err());
        assert!(service.verify(&t2, TokenKind::Access).await.is_ok());
    }
}
