//! TTL-bounded revocation store for token IDs.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use bookly_cache::CacheManager;
use bookly_cache::keys;
use bookly_core::result::AppResult;
use bookly_core::traits::cache::CacheProvider;

/// Marks token IDs revoked until their natural expiry would pass anyway.
///
/// Revocation is deliberately not permanent: an entry only needs to outlast
/// the token's own expiry window, since an expired token is rejected by the
/// codec regardless. Absence of an entry — including absence caused by TTL
/// expiry — means "not revoked".
#[derive(Debug, Clone)]
pub struct TokenBlocklist {
    /// Cache backend holding the revoked-jti set.
    cache: Arc<CacheManager>,
    /// How long a revocation entry lives.
    entry_ttl: Duration,
}

impl TokenBlocklist {
    /// Creates a blocklist with the given entry TTL.
    pub fn new(cache: Arc<CacheManager>, entry_ttl_seconds: u64) -> Self {
        Self {
            cache,
            entry_ttl: Duration::from_secs(entry_ttl_seconds),
        }
    }

    /// Idempotently marks a token ID revoked.
    ///
    /// A failed write surfaces to the caller as a server error; logout is
    /// not silently retried.
    pub async fn revoke(&self, jti: Uuid) -> AppResult<()> {
        self.cache
            .set(&keys::jwt_blocklist(jti), "revoked", self.entry_ttl)
            .await
    }

    /// Checks whether a token ID has been revoked.
    pub async fn is_revoked(&self, jti: Uuid) -> AppResult<bool> {
        self.cache.exists(&keys::jwt_blocklist(jti)).await
    }
}
