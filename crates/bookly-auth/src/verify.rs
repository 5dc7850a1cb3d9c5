//! Out-of-band verification tokens for email-verification and
//! password-reset links.
//!
//! These tokens share the application's base secret but sign with a key
//! derived through a distinct context string, so an access token can never
//! be replayed as a verification link or vice versa. They are time-boxed
//! and not revocable; single use is enforced by the idempotence of the
//! action each link gates.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use bookly_core::config::auth::AuthConfig;
use bookly_core::error::AppError;
use bookly_core::result::AppResult;

/// Purpose tag embedded in every verification token.
const PURPOSE: &str = "email-verification";

/// Context string mixed into the signing-key derivation.
const KEY_CONTEXT: &str = "bookly-email-verification";

/// Claims carried by a verification token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VerificationClaims {
    /// The email address this link was issued for.
    email: String,
    /// Purpose tag preventing cross-use with other token families.
    purpose: String,
    /// Issued-at timestamp (seconds since epoch).
    iat: i64,
    /// Expiry timestamp (seconds since epoch).
    exp: i64,
}

/// Signs and verifies time-boxed single-claim tokens.
#[derive(Clone)]
pub struct VerificationTokenCodec {
    /// Derived HMAC key for signing.
    encoding_key: EncodingKey,
    /// Derived HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation rules applied on decode.
    validation: Validation,
    /// Maximum token age in seconds.
    max_age_seconds: i64,
}

impl std::fmt::Debug for VerificationTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationTokenCodec")
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}

impl VerificationTokenCodec {
    /// Creates a codec from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let key = derive_key(&config.jwt_secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(&key),
            decoding_key: DecodingKey::from_secret(&key),
            validation,
            max_age_seconds: config.verification_max_age_seconds as i64,
        }
    }

    /// Creates a signed, time-boxed token for the given email address.
    pub fn create(&self, email: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = VerificationClaims {
            email: email.to_string(),
            purpose: PURPOSE.to_string(),
            iat: now,
            exp: now + self.max_age_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode verification token: {e}")))
    }

    /// Decodes a verification token, returning the embedded email address.
    ///
    /// Bad signature, wrong purpose, and exceeded max age all collapse into
    /// the uniform invalid-token error; the real cause is only logged.
    pub fn decode(&self, token: &str) -> AppResult<String> {
        let data =
            decode::<VerificationClaims>(token, &self.decoding_key, &self.validation).map_err(
                |e| {
                    warn!(error = %e, "Verification token decode failed");
                    AppError::invalid_token("Invalid or expired verification link")
                },
            )?;

        if data.claims.purpose != PURPOSE {
            warn!(purpose = %data.claims.purpose, "Verification token with wrong purpose");
            return Err(AppError::invalid_token("Invalid or expired verification link"));
        }

        Ok(data.claims.email)
    }
}

/// Derives the verification-token signing key from the base secret.
fn derive_key(secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(KEY_CONTEXT.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookly_core::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-with-enough-entropy".to_string(),
            jwt_algorithm: "HS256".to_string(),
            access_ttl_seconds: 3600,
            refresh_ttl_days: 2,
            revocation_ttl_seconds: 3600,
            verification_max_age_seconds: 86400,
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = VerificationTokenCodec::new(&config());
        let token = codec.create("reader@bookly.dev").unwrap();
        assert_eq!(codec.decode(&token).unwrap(), "reader@bookly.dev");
    }

    #[test]
    fn test_expired_link_rejected() {
        let codec = VerificationTokenCodec::new(&config());

        let now = Utc::now().timestamp();
        let stale = VerificationClaims {
            email: "reader@bookly.dev".into(),
            purpose: PURPOSE.into(),
            iat: now - 172800,
            exp: now - 86400,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &stale,
            &codec.encoding_key,
        )
        .unwrap();

        let err = codec.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_wrong_purpose_rejected() {
        let codec = VerificationTokenCodec::new(&config());

        let now = Utc::now().timestamp();
        let claims = VerificationClaims {
            email: "reader@bookly.dev".into(),
            purpose: "something-else".into(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &codec.encoding_key,
        )
        .unwrap();

        let err = codec.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_access_token_key_namespace_is_separate() {
        // A token signed with the raw secret must not validate against the
        // derived verification key.
        let cfg = config();
        let codec = VerificationTokenCodec::new(&cfg);

        let now = Utc::now().timestamp();
        let claims = VerificationClaims {
            email: "reader@bookly.dev".into(),
            purpose: PURPOSE.into(),
            iat: now,
            exp: now + 3600,
        };
        let foreign = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(codec.decode(&foreign).is_err());
    }

    #[test]
    fn test_derived_key_differs_from_secret() {
        let key = derive_key("secret");
        assert_ne!(key, b"secret".to_vec());
        assert_eq!(key.len(), 32);
    }
}
