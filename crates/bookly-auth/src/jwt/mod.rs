//! Signed token codec and typed claims.

pub mod claims;
pub mod codec;

pub use claims::{TokenClaims, TokenKind, TokenUser};
pub use codec::JwtCodec;
