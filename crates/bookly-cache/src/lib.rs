//! # bookly-cache
//!
//! Cache provider implementations for Bookly. Supports two modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. The token
//! revocation blocklist lives on top of this crate: a revoked token ID is a
//! cache entry whose TTL outlasts the token's own expiry window.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
