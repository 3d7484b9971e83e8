//! Route definitions for the `/work-orders` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::work_orders;
use crate::state::AppState;

/// Routes mounted at `/work-orders`.
///
/// ```text
/// GET   /              -> list_work_orders
/// POST  /              -> create_work_order
/// POST  /bulk          -> create_bulk_work_orders
/// GET   /{id}          -> get_work_order
/// PATCH /{id}/status   -> update_work_order_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_orders::list_work_orders).post(work_orders::create_work_order),
        )
        .route("/bulk", post(work_orders::create_bulk_work_orders))
        .route("/{id}", get(work_orders::get_work_order))
        .route("/{id}/status", patch(work_orders::update_work_order_status))
}
