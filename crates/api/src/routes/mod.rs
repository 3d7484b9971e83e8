pub mod assets;
pub mod dashboard;
pub mod health;
pub mod inspections;
pub mod work_orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                          list, create
/// /assets/import                   bulk import (POST)
/// /assets/{id}                     get, update, delete (soft)
/// /assets/{id}/restore             restore (POST)
/// /assets/{id}/inspections         list, create
///
/// /inspections/{id}                inspection detail
///
/// /work-orders                     list, create
/// /work-orders/bulk                bulk fan-out (POST)
/// /work-orders/{id}                get
/// /work-orders/{id}/status         status transition (PATCH)
///
/// /dashboard/summary               band distribution + totals
/// /dashboard/regions               per-region roll-up
/// /dashboard/urgency               urgency distribution
/// /dashboard/cost-trend            monthly maintenance cost trend
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/inspections", inspections::router())
        .nest("/work-orders", work_orders::router())
        .nest("/dashboard", dashboard::router())
}
