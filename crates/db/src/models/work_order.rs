//! Work order models and DTOs.

use chrono::NaiveDate;
use rams_core::aggregation::CostObservation;
use rams_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `work_orders` table. `status` holds a stored status;
/// the derived Overdue state is computed at read time by the API layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkOrder {
    pub id: DbId,
    pub group_id: Option<Uuid>,
    pub asset_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub scheduled_for: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub technician: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The cost projection the monthly trend aggregation consumes.
#[derive(Debug, Clone, FromRow)]
pub struct CostRow {
    pub incurred_on: NaiveDate,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
}

impl From<CostRow> for CostObservation {
    fn from(row: CostRow) -> Self {
        CostObservation {
            incurred_on: row.incurred_on,
            estimated_cost: row.estimated_cost,
            actual_cost: row.actual_cost,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a single work order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkOrder {
    pub asset_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_for: Option<NaiveDate>,
    pub estimated_cost: Option<f64>,
    pub technician: Option<String>,
}

/// DTO for fanning one work order definition across many assets.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBulkWorkOrders {
    pub asset_ids: Vec<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_for: Option<NaiveDate>,
    pub estimated_cost: Option<f64>,
    pub technician: Option<String>,
}

/// DTO for a status change request.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkOrderStatus {
    pub status: String,
    /// Recorded when completing an order.
    pub actual_cost: Option<f64>,
}

/// Query parameters for listing work orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkOrderSearchParams {
    /// Filter by stored status.
    pub status: Option<String>,
    /// Filter by target asset.
    pub asset_id: Option<DbId>,
    /// Filter by bulk fan-out group.
    pub group_id: Option<Uuid>,
    /// Maximum results (default 50, max 200).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}
