//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use bookly_auth::tokens::TokenService;
use bookly_cache::provider::CacheManager;
use bookly_core::config::AppConfig;
use bookly_database::repositories::user::UserRepository;
use bookly_service::auth::AuthService;
use bookly_service::book::BookService;
use bookly_service::review::ReviewService;
use bookly_service::tag::TagService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; everything is constructed
/// once at startup and shared read-only thereafter.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Token issuer/verifier.
    pub token_service: Arc<TokenService>,
    /// User repository (token-identity resolution).
    pub user_repo: Arc<UserRepository>,
    /// Account and credential flows.
    pub auth_service: Arc<AuthService>,
    /// Book catalog service.
    pub book_service: Arc<BookService>,
    /// Review service.
    pub review_service: Arc<ReviewService>,
    /// Tag service.
    pub tag_service: Arc<TagService>,
}
