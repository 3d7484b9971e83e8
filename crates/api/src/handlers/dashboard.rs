//! Handlers for the dashboard aggregation endpoints.
//!
//! Each endpoint projects rows into the plain shapes `rams-core`
//! consumes and delegates every classification and roll-up decision to
//! the pure aggregation functions, so the dashboard can never disagree
//! with the asset list about what "Poor" means.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Months, NaiveDate, Utc};
use rams_core::aggregation::{
    aggregate_by_band, aggregate_by_region, aggregate_by_urgency, monthly_cost_trend,
    AssetObservation, CostObservation,
};
use rams_core::condition::{clamp_ci, ConditionBand};
use rams_core::presentation::{band_color, urgency_color};
use rams_core::urgency::UrgencyLevel;
use rams_db::repositories::{AssetRepo, WorkOrderRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One slice of the band distribution, ready for chart rendering.
#[derive(Debug, Serialize)]
pub struct BandSlice {
    pub band: ConditionBand,
    pub label: &'static str,
    pub color: &'static str,
    pub count: i64,
}

/// Portfolio-wide dashboard summary.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub asset_count: i64,
    pub inspected_count: i64,
    /// Mean CI across inspected assets; `null` when nothing is inspected.
    pub mean_ci: Option<f64>,
    pub replacement_value_total: f64,
    pub bands: Vec<BandSlice>,
}

/// One slice of the urgency distribution. `level` is `null` for the
/// unclassified bucket.
#[derive(Debug, Serialize)]
pub struct UrgencySlice {
    pub level: Option<UrgencyLevel>,
    pub label: &'static str,
    pub color: &'static str,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboard/cost-trend`.
#[derive(Debug, Deserialize)]
pub struct CostTrendQuery {
    /// How many months back to include. Defaults to 12, capped at 60.
    pub months: Option<u32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/summary
///
/// Band distribution plus portfolio totals.
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let observations: Vec<AssetObservation> = AssetRepo::observations(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let bands = aggregate_by_band(&observations)
        .into_iter()
        .map(|bucket| BandSlice {
            band: bucket.band,
            label: bucket.band.label(),
            color: band_color(bucket.band),
            count: bucket.count,
        })
        .collect();

    let scored: Vec<f64> = observations
        .iter()
        .filter_map(|o| o.latest_ci)
        .map(clamp_ci)
        .collect();
    let mean_ci = if scored.is_empty() {
        None
    } else {
        Some(scored.iter().sum::<f64>() / scored.len() as f64)
    };

    let summary = DashboardSummary {
        asset_count: observations.len() as i64,
        inspected_count: scored.len() as i64,
        mean_ci,
        replacement_value_total: observations
            .iter()
            .filter_map(|o| o.replacement_value)
            .filter(|v| v.is_finite())
            .sum(),
        bands,
    };

    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/dashboard/regions
///
/// Per-region roll-up: counts, mean CI (null when the region has no
/// scored assets), poor counts, and replacement value totals.
pub async fn regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let observations: Vec<AssetObservation> = AssetRepo::observations(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DataResponse {
        data: aggregate_by_region(&observations),
    }))
}

/// GET /api/v1/dashboard/urgency
///
/// Urgency distribution in ordinal order with a trailing unclassified
/// bucket.
pub async fn urgency(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let observations: Vec<AssetObservation> = AssetRepo::observations(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let slices: Vec<UrgencySlice> = aggregate_by_urgency(&observations)
        .into_iter()
        .map(|bucket| UrgencySlice {
            label: bucket.level.map_or("Unclassified", UrgencyLevel::label),
            color: bucket
                .level
                .map_or(band_color(ConditionBand::NotInspected), urgency_color),
            level: bucket.level,
            count: bucket.count,
        })
        .collect();

    Ok(Json(DataResponse { data: slices }))
}

/// GET /api/v1/dashboard/cost-trend
///
/// Monthly maintenance cost trend over the requested window.
pub async fn cost_trend(
    State(state): State<AppState>,
    Query(query): Query<CostTrendQuery>,
) -> AppResult<impl IntoResponse> {
    let months = query.months.unwrap_or(12).clamp(1, 60);
    let since = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);

    let costs: Vec<CostObservation> = WorkOrderRepo::cost_rows(&state.pool, Some(since))
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DataResponse {
        data: monthly_cost_trend(&costs),
    }))
}
