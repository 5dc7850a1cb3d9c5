//! Bookly Server — book catalog REST API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bookly_core::config::AppConfig;
use bookly_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("BOOKLY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Bookly v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = bookly_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    tracing::info!("Running database migrations...");
    bookly_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache...");
    let cache = Arc::new(bookly_cache::provider::CacheManager::new(&config.cache).await?);

    // ── Step 3: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(bookly_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let book_repo = Arc::new(bookly_database::repositories::book::BookRepository::new(
        db_pool.clone(),
    ));
    let review_repo = Arc::new(
        bookly_database::repositories::review::ReviewRepository::new(db_pool.clone()),
    );
    let tag_repo = Arc::new(bookly_database::repositories::tag::TagRepository::new(
        db_pool.clone(),
    ));

    // ── Step 4: Initialize auth core ─────────────────────────────
    tracing::info!("Initializing authentication core...");
    let password_hasher = Arc::new(bookly_auth::password::hasher::PasswordHasher::new());
    let token_service = Arc::new(bookly_auth::tokens::TokenService::new(
        &config.auth,
        Arc::clone(&cache),
    )?);
    let verification = Arc::new(bookly_auth::verify::VerificationTokenCodec::new(
        &config.auth,
    ));

    // ── Step 5: Initialize mail client ───────────────────────────
    let mailer = Arc::new(bookly_mail::client::EmailClient::new(&config.mail)?);

    // ── Step 6: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let auth_service = Arc::new(bookly_service::auth::service::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&token_service),
        Arc::clone(&verification),
        mailer,
        config.mail.frontend_url.clone(),
    ));
    let book_service = Arc::new(bookly_service::book::service::BookService::new(
        Arc::clone(&book_repo),
        Arc::clone(&review_repo),
        Arc::clone(&tag_repo),
    ));
    let review_service = Arc::new(bookly_service::review::service::ReviewService::new(
        Arc::clone(&review_repo),
        Arc::clone(&book_repo),
    ));
    let tag_service = Arc::new(bookly_service::tag::service::TagService::new(
        Arc::clone(&tag_repo),
        Arc::clone(&book_repo),
    ));

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = bookly_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cache: Arc::clone(&cache),
        token_service: Arc::clone(&token_service),
        user_repo: Arc::clone(&user_repo),
        auth_service,
        book_service,
        review_service,
        tag_service,
    };

    let app = bookly_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Bookly server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Bookly server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
