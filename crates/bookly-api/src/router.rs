//! Route definitions for the Bookly HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(book_routes())
        .merge(review_routes())
        .merge(tag_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: signup, verification, login, refresh, me, logout, reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/verify/{token}", get(handlers::auth::verify_email))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/password-reset-request",
            post(handlers::auth::password_reset_request),
        )
        .route(
            "/auth/password-reset-confirm/{token}",
            post(handlers::auth::password_reset_confirm),
        )
}

/// Book CRUD
fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(handlers::book::list_books))
        .route("/books", post(handlers::book::create_book))
        .route("/books/user/{user_id}", get(handlers::book::user_books))
        .route("/books/{book_id}", get(handlers::book::get_book))
        .route("/books/{book_id}", patch(handlers::book::update_book))
        .route("/books/{book_id}", delete(handlers::book::delete_book))
}

/// Review CRUD
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(handlers::review::list_reviews))
        .route(
            "/reviews/book/{book_id}",
            post(handlers::review::add_review),
        )
        .route("/reviews/{review_id}", get(handlers::review::get_review))
        .route(
            "/reviews/{review_id}",
            delete(handlers::review::delete_review),
        )
}

/// Tag CRUD and book association
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(handlers::tag::list_tags))
        .route("/tags", post(handlers::tag::create_tag))
        .route("/tags/book/{book_id}", post(handlers::tag::add_tags_to_book))
        .route("/tags/{tag_id}", put(handlers::tag::update_tag))
        .route("/tags/{tag_id}", delete(handlers::tag::delete_tag))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
