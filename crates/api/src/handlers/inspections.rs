//! Handlers for asset inspections.
//!
//! Recording an inspection derives the DERU score and urgency from the
//! component ratings (unless the inspector recorded an explicit urgency),
//! clamps the Condition Index, and lets the repository write the outcome
//! back onto the parent asset.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rams_core::condition::clamp_ci;
use rams_core::deru::{derive_urgency, inspection_deru_score};
use rams_core::error::CoreError;
use rams_core::types::DbId;
use rams_core::urgency::UrgencyLevel;
use rams_db::models::inspection::{CreateInspection, NewInspection};
use rams_db::repositories::InspectionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::assets::ensure_asset_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination for inspection listings.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assets/{id}/inspections
///
/// Record an inspection for an asset.
pub async fn create_inspection(
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
    Json(input): Json<CreateInspection>,
) -> AppResult<impl IntoResponse> {
    ensure_asset_exists(&state.pool, asset_id).await?;

    if input.inspector.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Inspector must not be empty".to_string(),
        )));
    }
    for rating in &input.components {
        rating.validate().map_err(AppError::Core)?;
    }

    // Explicit urgency wins; otherwise the worst component rating drives it.
    let urgency = match input.urgency.as_deref() {
        Some(raw) => Some(UrgencyLevel::parse(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown urgency level: '{raw}'"
            )))
        })?),
        None => derive_urgency(&input.components),
    };

    let record = NewInspection {
        asset_id,
        inspector: input.inspector.trim().to_string(),
        inspected_at: input.inspected_at.unwrap_or_else(Utc::now),
        condition_index: clamp_ci(input.condition_index),
        urgency: urgency.map(|l| l.as_str().to_string()),
        deru_score: inspection_deru_score(&input.components),
        notes: input.notes,
        components: input.components,
    };

    let (inspection, components) = InspectionRepo::create(&state.pool, &record).await?;

    tracing::info!(
        asset_id,
        inspection_id = inspection.id,
        condition_index = inspection.condition_index,
        urgency = inspection.urgency.as_deref().unwrap_or("-"),
        "Inspection recorded",
    );

    let detail = serde_json::json!({
        "inspection": inspection,
        "components": components,
    });
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/assets/{id}/inspections
///
/// List an asset's inspections, newest first.
pub async fn list_asset_inspections(
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    ensure_asset_exists(&state.pool, asset_id).await?;

    let inspections =
        InspectionRepo::list_by_asset(&state.pool, asset_id, page.limit, page.offset).await?;

    Ok(Json(DataResponse { data: inspections }))
}

/// GET /api/v1/inspections/{id}
///
/// Get one inspection with its component ratings.
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let inspection = InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))?;
    let components = InspectionRepo::components_for(&state.pool, id).await?;

    let detail = serde_json::json!({
        "inspection": inspection,
        "components": components,
    });
    Ok(Json(DataResponse { data: detail }))
}
