//! Health check handlers.

use axum::Json;
use axum::extract::State;

use bookly_core::traits::cache::CacheProvider;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(1) => "connected",
        _ => "unreachable",
    };

    let cache = match state.cache.health_check().await {
        Ok(true) => "connected",
        _ => "unreachable",
    };

    let status = if database == "connected" && cache == "connected" {
        "ok"
    } else {
        "degraded"
    };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
    })
}
