//! Repository for the `work_orders` table.

use rams_core::types::DbId;
use rams_core::work_orders::{STATUS_CANCELLED, STATUS_COMPLETED};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::work_order::{
    CostRow, CreateBulkWorkOrders, CreateWorkOrder, WorkOrder, WorkOrderSearchParams,
};

/// Column list for `work_orders` queries.
const WORK_ORDER_COLUMNS: &str = "\
    id, group_id, asset_id, title, description, status, \
    scheduled_for, completed_at, estimated_cost, actual_cost, \
    technician, created_at, updated_at";

/// Default page size for work order listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for work order listing.
const MAX_LIMIT: i64 = 200;

/// Provides persistence for maintenance work orders.
pub struct WorkOrderRepo;

impl WorkOrderRepo {
    /// Create a single work order (status starts as 'scheduled').
    pub async fn create(pool: &PgPool, input: &CreateWorkOrder) -> Result<WorkOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_orders (\
                asset_id, title, description, scheduled_for, \
                estimated_cost, technician\
             ) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {WORK_ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(input.asset_id)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.scheduled_for)
            .bind(input.estimated_cost)
            .bind(input.technician.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Fan one work order definition across many assets in a single
    /// transaction. All created rows share `group_id`.
    pub async fn create_bulk(
        pool: &PgPool,
        group_id: Uuid,
        input: &CreateBulkWorkOrders,
    ) -> Result<Vec<WorkOrder>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(input.asset_ids.len());

        let query = format!(
            "INSERT INTO work_orders (\
                group_id, asset_id, title, description, scheduled_for, \
                estimated_cost, technician\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {WORK_ORDER_COLUMNS}"
        );

        for asset_id in &input.asset_ids {
            let order = sqlx::query_as::<_, WorkOrder>(&query)
                .bind(group_id)
                .bind(asset_id)
                .bind(&input.title)
                .bind(input.description.as_deref())
                .bind(input.scheduled_for)
                .bind(input.estimated_cost)
                .bind(input.technician.as_deref())
                .fetch_one(&mut *tx)
                .await?;
            created.push(order);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a work order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = $1");
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List work orders with optional filters, newest first.
    pub async fn search(
        pool: &PgPool,
        params: &WorkOrderSearchParams,
    ) -> Result<Vec<WorkOrder>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.asset_id.is_some() {
            conditions.push(format!("asset_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.group_id.is_some() {
            conditions.push(format!("group_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders \
             {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, WorkOrder>(&query);
        if let Some(ref status) = params.status {
            q = q.bind(status);
        }
        if let Some(asset_id) = params.asset_id {
            q = q.bind(asset_id);
        }
        if let Some(group_id) = params.group_id {
            q = q.bind(group_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Write a new stored status. Completing an order stamps
    /// `completed_at` and records the actual cost when given.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        actual_cost: Option<f64>,
    ) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE work_orders SET \
                status = $2, \
                actual_cost = COALESCE($3, actual_cost), \
                completed_at = CASE WHEN $2 = $4 THEN NOW() ELSE completed_at END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {WORK_ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .bind(status)
            .bind(actual_cost)
            .bind(STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    /// Project work-order costs for the monthly trend. Cancelled orders
    /// are excluded; each cost is attributed to the completion date when
    /// known, otherwise the scheduled date, otherwise creation.
    pub async fn cost_rows(
        pool: &PgPool,
        since: Option<chrono::NaiveDate>,
    ) -> Result<Vec<CostRow>, sqlx::Error> {
        let mut query = String::from(
            "SELECT \
                COALESCE(completed_at::date, scheduled_for, created_at::date) AS incurred_on, \
                estimated_cost, actual_cost \
             FROM work_orders \
             WHERE status <> $1",
        );
        if since.is_some() {
            query.push_str(
                " AND COALESCE(completed_at::date, scheduled_for, created_at::date) >= $2",
            );
        }

        let mut q = sqlx::query_as::<_, CostRow>(&query).bind(STATUS_CANCELLED);
        if let Some(since) = since {
            q = q.bind(since);
        }
        q.fetch_all(pool).await
    }
}
