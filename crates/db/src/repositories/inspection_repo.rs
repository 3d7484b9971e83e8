//! Repository for the `inspections` and `inspection_components` tables.
//!
//! Owns the denormalization invariant: an asset's `latest_ci` /
//! `latest_urgency` / `latest_inspected_at` always reflect its
//! chronologically most recent inspection.

use rams_core::types::DbId;
use sqlx::PgPool;

use crate::models::inspection::{Inspection, InspectionComponent, NewInspection};

/// Column list for `inspections` queries.
const INSPECTION_COLUMNS: &str = "\
    id, asset_id, inspector, inspected_at, condition_index, \
    urgency, deru_score, notes, created_at";

/// Column list for `inspection_components` queries.
const COMPONENT_COLUMNS: &str = "id, inspection_id, component, degree, extent, relevancy";

/// Default page size for inspection listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for inspection listing.
const MAX_LIMIT: i64 = 200;

/// Provides persistence for inspections and their component ratings.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Insert an inspection with its component rows, then write the
    /// outcome back onto the parent asset -- but only when this
    /// inspection is at least as recent as the asset's current latest,
    /// so late-arriving historical records never clobber newer state.
    pub async fn create(
        pool: &PgPool,
        record: &NewInspection,
    ) -> Result<(Inspection, Vec<InspectionComponent>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_inspection = format!(
            "INSERT INTO inspections (\
                asset_id, inspector, inspected_at, condition_index, \
                urgency, deru_score, notes\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {INSPECTION_COLUMNS}"
        );
        let inspection = sqlx::query_as::<_, Inspection>(&insert_inspection)
            .bind(record.asset_id)
            .bind(&record.inspector)
            .bind(record.inspected_at)
            .bind(record.condition_index)
            .bind(record.urgency.as_deref())
            .bind(record.deru_score)
            .bind(record.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let insert_component = format!(
            "INSERT INTO inspection_components (\
                inspection_id, component, degree, extent, relevancy\
             ) VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COMPONENT_COLUMNS}"
        );
        let mut components = Vec::with_capacity(record.components.len());
        for rating in &record.components {
            let component = sqlx::query_as::<_, InspectionComponent>(&insert_component)
                .bind(inspection.id)
                .bind(&rating.component)
                .bind(rating.degree)
                .bind(rating.extent)
                .bind(rating.relevancy)
                .fetch_one(&mut *tx)
                .await?;
            components.push(component);
        }

        sqlx::query(
            "UPDATE assets SET \
                latest_ci = $2, latest_urgency = $3, latest_inspected_at = $4, \
                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
               AND (latest_inspected_at IS NULL OR latest_inspected_at <= $4)",
        )
        .bind(record.asset_id)
        .bind(record.condition_index)
        .bind(record.urgency.as_deref())
        .bind(record.inspected_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((inspection, components))
    }

    /// Find an inspection by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {INSPECTION_COLUMNS} FROM inspections WHERE id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an asset's inspections, newest first.
    pub async fn list_by_asset(
        pool: &PgPool,
        asset_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Inspection>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {INSPECTION_COLUMNS} FROM inspections \
             WHERE asset_id = $1 \
             ORDER BY inspected_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(asset_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The component ratings recorded for one inspection.
    pub async fn components_for(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<InspectionComponent>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPONENT_COLUMNS} FROM inspection_components \
             WHERE inspection_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, InspectionComponent>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
