//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Reports service liveness, whether persistence is configured, and
/// whether the database currently answers.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let db_healthy = match &state.pool {
        Some(pool) => pictura_store::health_check(pool).await.is_ok(),
        None => false,
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "persistence": state.pool.is_some(),
        "db_healthy": db_healthy,
    }))
}
