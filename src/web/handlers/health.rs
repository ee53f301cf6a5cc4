//! Health checks.

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use super::AppState;

/// GET /health - The process is up.
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /health/db - The database answers queries.
pub async fn db_health_check(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
        }
    }
}
