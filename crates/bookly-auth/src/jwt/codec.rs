//! Signed token encoding and decoding.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::warn;

use bookly_core::error::AppError;
use bookly_core::result::AppResult;

use super::claims::TokenClaims;

/// Uniform message for every decode failure. The caller must not be able
/// to tell *why* a token was rejected.
pub(crate) const INVALID_TOKEN_MSG: &str = "Invalid or expired token";

/// Encodes and decodes signed, self-contained tokens.
#[derive(Clone)]
pub struct JwtCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Configured signing algorithm.
    algorithm: Algorithm,
    /// Validation rules applied on decode.
    validation: Validation,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl JwtCodec {
    /// Creates a codec from the configured secret and algorithm name.
    ///
    /// Only the HMAC family is supported; anything else is rejected at
    /// startup rather than at first use.
    pub fn new(secret: &str, algorithm_name: &str) -> AppResult<Self> {
        let algorithm: Algorithm = algorithm_name.parse().map_err(|_| {
            AppError::configuration(format!("Unknown JWT algorithm: '{algorithm_name}'"))
        })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::configuration(format!(
                "Unsupported JWT algorithm: '{algorithm_name}'. Expected HS256, HS384, or HS512"
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
        })
    }

    /// Serializes claims into a signed token string.
    pub fn encode(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Verifies signature and structural validity, returning the claims.
    ///
    /// Any failure — bad signature, malformed payload, unsupported
    /// algorithm, expiry in the past — is logged with its real cause and
    /// surfaced as the one uniform invalid-token error.
    pub fn decode(&self, token: &str) -> AppResult<TokenClaims> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                warn!(error = %e, "Token decode failed");
                Err(AppError::invalid_token(INVALID_TOKEN_MSG))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::{TokenKind, TokenUser};
    use bookly_core::error::ErrorKind;
    use bookly_entity::user::UserRole;
    use uuid::Uuid;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret-at-least-32-bytes-long!!", "HS256").unwrap()
    }

    fn claims() -> TokenClaims {
        TokenClaims::new(
            TokenUser {
                email: "reader@bookly.dev".into(),
                user_id: Uuid::new_v4(),
                role: Some(UserRole::User),
            },
            TokenKind::Access,
            3600,
        )
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let codec = codec();
        let original = claims();
        let token = codec.encode(&original).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded.user, original.user);
        assert_eq!(decoded.jti, original.jti);
        assert_eq!(decoded.refresh, original.refresh);
        assert_eq!(decoded.exp, original.exp);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = codec();
        let token = codec.encode(&claims()).unwrap();

        // Flip one character in the payload segment.
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = codec.decode(&tampered).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().encode(&claims()).unwrap();
        let other = JwtCodec::new("a-completely-different-secret-value", "HS256").unwrap();
        let err = other.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let mut expired = claims();
        expired.exp = chrono::Utc::now().timestamp() - 60;
        let token = codec.encode(&expired).unwrap();

        let err = codec.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(err.message, INVALID_TOKEN_MSG);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = codec().decode("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_non_hmac_algorithm_refused_at_construction() {
        assert!(JwtCodec::new("secret", "RS256").is_err());
        assert!(JwtCodec::new("secret", "bogus").is_err());
    }
}
