//! Asset models and DTOs.

use chrono::NaiveDate;
use rams_core::aggregation::AssetObservation;
use rams_core::condition::ConditionBand;
use rams_core::types::{DbId, Timestamp};
use rams_core::urgency::UrgencySignals;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
///
/// `latest_ci` / `latest_urgency` / `latest_inspected_at` denormalize the
/// outcome of the chronologically most recent inspection; they are written
/// by [`crate::repositories::InspectionRepo`] and treated as authoritative
/// everywhere else.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub reference_code: String,
    pub asset_class: String,
    pub description: Option<String>,
    pub region: Option<String>,
    pub depot: Option<String>,
    pub ward: Option<String>,
    pub owner: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: Option<NaiveDate>,
    pub replacement_value: Option<f64>,
    pub latest_ci: Option<f64>,
    pub latest_urgency: Option<String>,
    pub latest_inspected_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The projection of an asset row the dashboard aggregations consume.
#[derive(Debug, Clone, FromRow)]
pub struct AssetObservationRow {
    pub region: Option<String>,
    pub latest_ci: Option<f64>,
    pub latest_urgency: Option<String>,
    pub replacement_value: Option<f64>,
}

impl From<AssetObservationRow> for AssetObservation {
    fn from(row: AssetObservationRow) -> Self {
        AssetObservation {
            region: row.region,
            latest_ci: row.latest_ci,
            latest_urgency: row.latest_urgency,
            replacement_value: row.replacement_value,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for registering a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub reference_code: String,
    pub asset_class: String,
    pub description: Option<String>,
    pub region: Option<String>,
    pub depot: Option<String>,
    pub ward: Option<String>,
    pub owner: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: Option<NaiveDate>,
    pub replacement_value: Option<f64>,
}

/// DTO for updating an existing asset's metadata. Absent fields keep
/// their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAsset {
    pub description: Option<String>,
    pub region: Option<String>,
    pub depot: Option<String>,
    pub ward: Option<String>,
    pub owner: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub installed_on: Option<NaiveDate>,
    pub replacement_value: Option<f64>,
}

/// One row of a bulk import request. Carries the normal creation fields
/// plus whatever legacy condition/urgency signals the source system had.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportAsset {
    #[serde(flatten)]
    pub asset: CreateAsset,
    pub latest_ci: Option<f64>,
    #[serde(flatten)]
    pub urgency: UrgencySignals,
}

/// An import row after validation and urgency resolution, ready to insert.
#[derive(Debug, Clone)]
pub struct ImportAssetRecord {
    pub asset: CreateAsset,
    pub latest_ci: Option<f64>,
    pub latest_urgency: Option<String>,
}

/// Query parameters for searching/listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetSearchParams {
    /// Filter by reference code (ILIKE substring).
    pub reference_code: Option<String>,
    /// Filter by asset class.
    pub asset_class: Option<String>,
    /// Filter by region (exact).
    pub region: Option<String>,
    /// Filter by condition band (band ranges from `rams-core` thresholds).
    pub band: Option<ConditionBand>,
    /// Filter by latest urgency level ("R", "0".."4").
    pub urgency: Option<String>,
    /// Maximum results (default 50, max 200).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}
