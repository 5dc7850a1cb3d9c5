//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// `jwt_secret` and `jwt_algorithm` carry no defaults: the process refuses
/// to start without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC).
    pub jwt_secret: String,
    /// JWT signing algorithm: `"HS256"`, `"HS384"`, or `"HS512"`.
    pub jwt_algorithm: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// TTL for revocation-blocklist entries in seconds. Must meet or exceed
    /// the access-token TTL so a revoked token stays blocked until it would
    /// have expired anyway.
    #[serde(default = "default_revocation_ttl")]
    pub revocation_ttl_seconds: u64,
    /// Maximum age of email-verification / password-reset tokens in seconds.
    #[serde(default = "default_verification_max_age")]
    pub verification_max_age_seconds: u64,
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    2
}

fn default_revocation_ttl() -> u64 {
    3600
}

fn default_verification_max_age() -> u64 {
    86400
}
