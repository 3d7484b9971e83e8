//! Handlers for the asset registry.
//!
//! Provides endpoints for asset CRUD, soft delete/restore, search, and
//! bulk import of legacy records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rams_core::assets::{
    validate_geolocation, validate_reference_code, validate_replacement_value, AssetClass,
    MAX_IMPORT_ROWS,
};
use rams_core::condition::{clamp_ci, classify_ci, ConditionBand};
use rams_core::error::CoreError;
use rams_core::presentation::band_color;
use rams_core::types::DbId;
use rams_core::urgency::{resolve_urgency, UrgencyLevel};
use rams_core::validation::validate_count_range;
use rams_db::models::asset::{
    Asset, AssetSearchParams, CreateAsset, ImportAsset, ImportAssetRecord, UpdateAsset,
};
use rams_db::repositories::{AssetRepo, InspectionRepo, WorkOrderRepo};
use rams_db::models::work_order::WorkOrderSearchParams;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// An asset enriched with its classification, ready for list/detail views.
#[derive(Debug, Serialize)]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Asset,
    pub band: ConditionBand,
    pub band_color: &'static str,
    pub urgency: Option<UrgencyLevel>,
}

impl From<Asset> for AssetView {
    fn from(asset: Asset) -> Self {
        let band = classify_ci(asset.latest_ci);
        let urgency = asset.latest_urgency.as_deref().and_then(UrgencyLevel::parse);
        Self {
            band,
            band_color: band_color(band),
            urgency,
            asset,
        }
    }
}

/// One rejected row of a bulk import request.
#[derive(Debug, Serialize)]
struct ImportRowError {
    row: usize,
    error: String,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Verify that a live asset exists, returning NotFound if it does not.
pub async fn ensure_asset_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    if AssetRepo::find_by_id(pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Asset", id }));
    }
    Ok(())
}

/// Validate the creation fields shared by create and import.
fn validate_create(input: &mut CreateAsset) -> Result<(), CoreError> {
    validate_reference_code(&input.reference_code)?;
    // Normalize the class to its canonical string form.
    let class = AssetClass::from_str(&input.asset_class)?;
    input.asset_class = class.as_str().to_string();
    validate_geolocation(input.latitude, input.longitude)?;
    validate_replacement_value(input.replacement_value)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Asset CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
///
/// List/search assets with optional filters. Every result carries its
/// condition band, band color, and parsed urgency.
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetSearchParams>,
) -> AppResult<impl IntoResponse> {
    let mut params = params;
    // Normalize the urgency filter so "2.0" and "r" match stored values.
    if let Some(ref raw) = params.urgency {
        let level = UrgencyLevel::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown urgency level: '{raw}'")))?;
        params.urgency = Some(level.as_str().to_string());
    }

    let assets = AssetRepo::search(&state.pool, &params).await?;
    let views: Vec<AssetView> = assets.into_iter().map(AssetView::from).collect();

    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/assets
///
/// Register a new asset.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    let mut input = input;
    validate_create(&mut input).map_err(AppError::Core)?;

    let asset = AssetRepo::create(&state.pool, &input, None, None).await?;

    tracing::info!(
        asset_id = asset.id,
        reference_code = %asset.reference_code,
        asset_class = %asset.asset_class,
        "Asset registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AssetView::from(asset),
        }),
    ))
}

/// GET /api/v1/assets/{id}
///
/// Get full asset detail including recent inspections and open work orders.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    let inspections = InspectionRepo::list_by_asset(&state.pool, id, Some(5), None).await?;
    let work_orders = WorkOrderRepo::search(
        &state.pool,
        &WorkOrderSearchParams {
            asset_id: Some(id),
            ..WorkOrderSearchParams::default()
        },
    )
    .await?;

    let detail = serde_json::json!({
        "asset": AssetView::from(asset),
        "recent_inspections": inspections,
        "work_orders": work_orders,
    });

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/assets/{id}
///
/// Update an asset's metadata. Absent fields keep their current value.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<impl IntoResponse> {
    validate_geolocation(input.latitude, input.longitude).map_err(AppError::Core)?;
    validate_replacement_value(input.replacement_value).map_err(AppError::Core)?;

    let asset = AssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    tracing::info!(asset_id = id, "Asset updated");

    Ok(Json(DataResponse {
        data: AssetView::from(asset),
    }))
}

/// DELETE /api/v1/assets/{id}
///
/// Soft-delete an asset. The row survives for restore and audit; all
/// listings and aggregations exclude it.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AssetRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Asset", id }));
    }

    tracing::info!(asset_id = id, "Asset deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/assets/{id}/restore
///
/// Restore a soft-deleted asset. Conflicts (409) if its reference code
/// has since been reissued to another live asset.
pub async fn restore_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::restore(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    tracing::info!(asset_id = id, "Asset restored");

    Ok(Json(DataResponse {
        data: AssetView::from(asset),
    }))
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/import
///
/// Bulk import of legacy asset records. Rows may carry condition and
/// urgency signals under any of the historical field names; each row's
/// urgency is resolved through the fixed-precedence chain before insert.
/// The batch is all-or-nothing: any invalid row rejects the request with
/// per-row errors, and any database conflict rolls back every insert.
pub async fn import_assets(
    State(state): State<AppState>,
    Json(rows): Json<Vec<ImportAsset>>,
) -> AppResult<impl IntoResponse> {
    validate_count_range(rows.len(), MAX_IMPORT_ROWS, "Import").map_err(AppError::Core)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let mut asset = row.asset;
        if let Err(err) = validate_create(&mut asset) {
            errors.push(ImportRowError {
                row: index,
                error: err.to_string(),
            });
            continue;
        }

        records.push(ImportAssetRecord {
            asset,
            latest_ci: row.latest_ci.map(clamp_ci),
            latest_urgency: resolve_urgency(&row.urgency).map(|l| l.as_str().to_string()),
        });
    }

    if !errors.is_empty() {
        let body = serde_json::json!({
            "error": "Import validation failed",
            "code": "VALIDATION_ERROR",
            "rows": errors,
        });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let inserted = AssetRepo::bulk_insert(&state.pool, &records).await?;

    tracing::info!(imported = inserted.len(), "Assets imported");

    let body = DataResponse {
        data: serde_json::json!({
            "imported": inserted.len(),
            "asset_ids": inserted.iter().map(|a| a.id).collect::<Vec<_>>(),
        }),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
