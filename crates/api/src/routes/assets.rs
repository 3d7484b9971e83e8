//! Route definitions for the `/assets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assets, inspections};
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /                    -> list_assets
/// POST   /                    -> create_asset
/// POST   /import              -> import_assets
/// GET    /{id}                -> get_asset
/// PUT    /{id}                -> update_asset
/// DELETE /{id}                -> delete_asset (soft)
/// POST   /{id}/restore        -> restore_asset
/// GET    /{id}/inspections    -> list_asset_inspections
/// POST   /{id}/inspections    -> create_inspection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/import", post(assets::import_assets))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/restore", post(assets::restore_asset))
        .route(
            "/{id}/inspections",
            get(inspections::list_asset_inspections).post(inspections::create_inspection),
        )
}
