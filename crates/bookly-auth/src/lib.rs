//! # bookly-auth
//!
//! Authentication and authorization core for Bookly.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — signed token codec and typed claims
//! - `blocklist` — TTL-bounded revocation store for token IDs
//! - `tokens` — access/refresh token issuance and verification
//! - `rbac` — role-based access checks (set membership)
//! - `verify` — out-of-band email-verification / password-reset tokens

pub mod blocklist;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod tokens;
pub mod verify;

pub use blocklist::TokenBlocklist;
pub use jwt::{JwtCodec, TokenClaims, TokenKind, TokenUser};
pub use password::PasswordHasher;
pub use tokens::TokenService;
pub use verify::VerificationTokenCodec;
