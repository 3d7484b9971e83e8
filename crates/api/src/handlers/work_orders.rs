//! Handlers for maintenance work orders.
//!
//! Status transitions are guarded by the core transition rules, and the
//! derived Overdue state is computed at read time -- it never reaches the
//! database.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rams_core::error::CoreError;
use rams_core::types::DbId;
use rams_core::validation::validate_non_negative;
use rams_core::work_orders::{
    effective_status, validate_bulk_asset_count, validate_title, validate_transition,
    WorkOrderStatus,
};
use rams_db::models::work_order::{
    CreateBulkWorkOrders, CreateWorkOrder, UpdateWorkOrderStatus, WorkOrder,
    WorkOrderSearchParams,
};
use rams_db::repositories::{AssetRepo, WorkOrderRepo};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::assets::ensure_asset_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A work order with its derived display status.
#[derive(Debug, Serialize)]
pub struct WorkOrderView {
    #[serde(flatten)]
    pub work_order: WorkOrder,
    pub effective_status: WorkOrderStatus,
}

/// Compute the derived view of a work order. A corrupt stored status is
/// a server-side invariant violation, not a caller error.
fn work_order_view(order: WorkOrder) -> AppResult<WorkOrderView> {
    let stored = WorkOrderStatus::from_stored_str(&order.status).map_err(|_| {
        AppError::InternalError(format!(
            "Work order {} has unknown stored status '{}'",
            order.id, order.status
        ))
    })?;
    let today = Utc::now().date_naive();
    Ok(WorkOrderView {
        effective_status: effective_status(stored, order.scheduled_for, today),
        work_order: order,
    })
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn validate_costs(estimated: Option<f64>, actual: Option<f64>) -> Result<(), CoreError> {
    if let Some(cost) = estimated {
        validate_non_negative(cost, "estimated_cost")?;
    }
    if let Some(cost) = actual {
        validate_non_negative(cost, "actual_cost")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/work-orders
///
/// List work orders with optional filters; each result reports its
/// derived effective status.
pub async fn list_work_orders(
    State(state): State<AppState>,
    Query(params): Query<WorkOrderSearchParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        // Reject unknown filters early instead of returning empty lists.
        WorkOrderStatus::from_stored_str(status).map_err(AppError::Core)?;
    }

    let orders = WorkOrderRepo::search(&state.pool, &params).await?;
    let views: Vec<WorkOrderView> = orders
        .into_iter()
        .map(work_order_view)
        .collect::<AppResult<_>>()?;

    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/work-orders
///
/// Schedule a single work order, optionally tied to an asset.
pub async fn create_work_order(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkOrder>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_costs(input.estimated_cost, None).map_err(AppError::Core)?;
    if let Some(asset_id) = input.asset_id {
        ensure_asset_exists(&state.pool, asset_id).await?;
    }

    let order = WorkOrderRepo::create(&state.pool, &input).await?;

    tracing::info!(
        work_order_id = order.id,
        asset_id = order.asset_id,
        title = %order.title,
        "Work order scheduled",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: work_order_view(order)?,
        }),
    ))
}

/// POST /api/v1/work-orders/bulk
///
/// Fan one work order definition across many assets. All created orders
/// share a `group_id` so the batch can be tracked together.
pub async fn create_bulk_work_orders(
    State(state): State<AppState>,
    Json(input): Json<CreateBulkWorkOrders>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_bulk_asset_count(input.asset_ids.len()).map_err(AppError::Core)?;
    validate_costs(input.estimated_cost, None).map_err(AppError::Core)?;

    let existing = AssetRepo::existing_ids(&state.pool, &input.asset_ids).await?;
    if existing.len() != input.asset_ids.len() {
        let missing: Vec<DbId> = input
            .asset_ids
            .iter()
            .filter(|id| !existing.contains(id))
            .copied()
            .collect();
        return Err(AppError::BadRequest(format!(
            "Unknown asset ids: {missing:?}"
        )));
    }

    let group_id = Uuid::new_v4();
    let orders = WorkOrderRepo::create_bulk(&state.pool, group_id, &input).await?;

    tracing::info!(
        %group_id,
        created = orders.len(),
        title = %input.title,
        "Bulk work orders created",
    );

    let views: Vec<WorkOrderView> = orders
        .into_iter()
        .map(work_order_view)
        .collect::<AppResult<_>>()?;
    let body = DataResponse {
        data: serde_json::json!({
            "group_id": group_id,
            "created": views.len(),
            "work_orders": views,
        }),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/work-orders/{id}
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = WorkOrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: work_order_view(order)?,
    }))
}

/// PATCH /api/v1/work-orders/{id}/status
///
/// Move a work order through its lifecycle. Invalid transitions are 409s;
/// requesting the derived 'overdue' state is a 400.
pub async fn update_work_order_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let to = WorkOrderStatus::from_stored_str(&input.status).map_err(AppError::Core)?;
    validate_costs(None, input.actual_cost).map_err(AppError::Core)?;

    let current = WorkOrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        }))?;
    let from = WorkOrderStatus::from_stored_str(&current.status).map_err(|_| {
        AppError::InternalError(format!(
            "Work order {id} has unknown stored status '{}'",
            current.status
        ))
    })?;

    validate_transition(from, to).map_err(AppError::Core)?;

    let updated = WorkOrderRepo::update_status(&state.pool, id, to.as_str(), input.actual_cost)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        }))?;

    tracing::info!(
        work_order_id = id,
        from = from.as_str(),
        to = to.as_str(),
        "Work order status changed",
    );

    Ok(Json(DataResponse {
        data: work_order_view(updated)?,
    }))
}
