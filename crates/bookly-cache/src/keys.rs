//! Cache key builders for all Bookly cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all Bookly cache keys.
const PREFIX: &str = "bookly";

/// Cache key for a revoked token ID in the JWT blocklist.
pub fn jwt_blocklist(jti: Uuid) -> String {
    format!("{PREFIX}:jwt:blocked:{jti}")
}

/// Cache key for a user entity by email.
pub fn user_by_email(email: &str) -> String {
    format!("{PREFIX}:user:email:{}", email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocklist_key_shape() {
        let jti = Uuid::nil();
        assert_eq!(
            jwt_blocklist(jti),
            "bookly:jwt:blocked:00000000-0000-0000-0000-000000000000"
        );
    }
}
