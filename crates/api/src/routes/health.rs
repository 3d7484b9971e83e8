//! Root-level health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Reports process liveness and database reachability. Always returns
/// 200 so load balancers can distinguish "up but degraded" from "down".
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = rams_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
