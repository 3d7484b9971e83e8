//! Route definitions for the `/inspections` resource.
//!
//! Creation and per-asset listing live under `/assets/{id}/inspections`.

use axum::routing::get;
use axum::Router;

use crate::handlers::inspections;
use crate::state::AppState;

/// Routes mounted at `/inspections`.
///
/// ```text
/// GET /{id} -> get_inspection
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(inspections::get_inspection))
}
