//! Route definitions for the `/dashboard` aggregation endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary     -> condition band distribution + portfolio totals
/// GET /regions     -> per-region roll-up
/// GET /urgency     -> urgency distribution
/// GET /cost-trend  -> monthly maintenance cost trend (?months=N)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/regions", get(dashboard::regions))
        .route("/urgency", get(dashboard::urgency))
        .route("/cost-trend", get(dashboard::cost_trend))
}
