//! Inspection models and DTOs.

use rams_core::deru::ComponentRating;
use rams_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub asset_id: DbId,
    pub inspector: String,
    pub inspected_at: Timestamp,
    pub condition_index: f64,
    pub urgency: Option<String>,
    pub deru_score: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `inspection_components` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InspectionComponent {
    pub id: DbId,
    pub inspection_id: DbId,
    pub component: String,
    pub degree: i16,
    pub extent: i16,
    pub relevancy: i16,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for recording a new inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInspection {
    pub inspector: String,
    /// Defaults to "now" when absent.
    pub inspected_at: Option<Timestamp>,
    pub condition_index: f64,
    /// Explicit urgency level. When absent, urgency is derived from the
    /// component ratings.
    pub urgency: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentRating>,
}

/// An inspection after validation and derivation, ready to insert.
#[derive(Debug, Clone)]
pub struct NewInspection {
    pub asset_id: DbId,
    pub inspector: String,
    pub inspected_at: Timestamp,
    /// Already clamped to the valid CI range.
    pub condition_index: f64,
    pub urgency: Option<String>,
    pub deru_score: Option<f64>,
    pub notes: Option<String>,
    pub components: Vec<ComponentRating>,
}
