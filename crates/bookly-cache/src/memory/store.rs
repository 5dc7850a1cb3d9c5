//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use moka::future::Cache;

use bookly_core::config::cache::MemoryCacheConfig;
use bookly_core::result::AppResult;
use bookly_core::traits::cache::CacheProvider;

/// A cached value with its own expiry instant.
///
/// moka enforces a cache-wide TTL; the revocation blocklist needs per-entry
/// TTLs, so each entry carries its deadline and reads treat stale entries
/// as absent.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Fetch an entry, evicting it if its own deadline has passed.
    async fn live_entry(&self, key: &str) -> Option<Entry> {
        let entry = self.cache.get(key).await?;
        if entry.expires_at <= Instant::now() {
            self.cache.invalidate(key).await;
            return None;
        }
        Some(entry)
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.live_entry(key).await.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        match self.live_entry(key).await {
            Some(entry) => {
                let renewed = Entry {
                    value: entry.value,
                    expires_at: Instant::now() + ttl,
                };
                self.cache.insert(key.to_string(), renewed).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}
