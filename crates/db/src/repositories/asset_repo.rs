//! Repository for the `assets` table.
//!
//! All read paths exclude soft-deleted rows; `restore` is the only query
//! that touches them.

use rams_core::condition::{ConditionBand, EXCELLENT_MIN_CI, FAIR_MIN_CI, GOOD_MIN_CI};
use rams_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{
    Asset, AssetObservationRow, AssetSearchParams, CreateAsset, ImportAssetRecord, UpdateAsset,
};

/// Column list for `assets` queries.
const ASSET_COLUMNS: &str = "\
    id, reference_code, asset_class, description, \
    region, depot, ward, owner, latitude, longitude, \
    installed_on, replacement_value, \
    latest_ci, latest_urgency, latest_inspected_at, \
    created_at, updated_at";

/// Default page size for asset listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for asset listing.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD and search operations for the asset registry.
pub struct AssetRepo;

impl AssetRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Register a new asset, optionally seeding the denormalized latest
    /// condition fields (used by bulk import of legacy data).
    pub async fn create(
        pool: &PgPool,
        input: &CreateAsset,
        latest_ci: Option<f64>,
        latest_urgency: Option<&str>,
    ) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (\
                reference_code, asset_class, description, \
                region, depot, ward, owner, latitude, longitude, \
                installed_on, replacement_value, latest_ci, latest_urgency\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.reference_code)
            .bind(&input.asset_class)
            .bind(input.description.as_deref())
            .bind(input.region.as_deref())
            .bind(input.depot.as_deref())
            .bind(input.ward.as_deref())
            .bind(input.owner.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.installed_on)
            .bind(input.replacement_value)
            .bind(latest_ci)
            .bind(latest_urgency)
            .fetch_one(pool)
            .await
    }

    /// Find a live asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query =
            format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search live assets with optional filters and pagination.
    ///
    /// The band filter translates to CI ranges using the same threshold
    /// constants the classifier uses, so filtering and classification
    /// cannot disagree.
    pub async fn search(
        pool: &PgPool,
        params: &AssetSearchParams,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        // Build dynamic WHERE clauses. Text/CI binds are applied in the
        // same order the conditions are pushed.
        let mut conditions = vec!["deleted_at IS NULL".to_string()];
        let mut text_binds: Vec<String> = Vec::new();
        let mut ci_binds: Vec<f64> = Vec::new();
        let mut bind_idx = 1u32;

        if let Some(ref code) = params.reference_code {
            conditions.push(format!("reference_code ILIKE ${bind_idx}"));
            text_binds.push(format!("%{code}%"));
            bind_idx += 1;
        }
        if let Some(ref class) = params.asset_class {
            conditions.push(format!("asset_class = ${bind_idx}"));
            text_binds.push(class.clone());
            bind_idx += 1;
        }
        if let Some(ref region) = params.region {
            conditions.push(format!("region = ${bind_idx}"));
            text_binds.push(region.clone());
            bind_idx += 1;
        }
        if let Some(ref urgency) = params.urgency {
            conditions.push(format!("latest_urgency = ${bind_idx}"));
            text_binds.push(urgency.clone());
            bind_idx += 1;
        }
        match params.band {
            Some(ConditionBand::Excellent) => {
                conditions.push(format!("latest_ci >= ${bind_idx}"));
                ci_binds.push(EXCELLENT_MIN_CI);
                bind_idx += 1;
            }
            Some(ConditionBand::Good) => {
                conditions.push(format!(
                    "latest_ci >= ${bind_idx} AND latest_ci < ${}",
                    bind_idx + 1
                ));
                ci_binds.push(GOOD_MIN_CI);
                ci_binds.push(EXCELLENT_MIN_CI);
                bind_idx += 2;
            }
            Some(ConditionBand::Fair) => {
                conditions.push(format!(
                    "latest_ci >= ${bind_idx} AND latest_ci < ${}",
                    bind_idx + 1
                ));
                ci_binds.push(FAIR_MIN_CI);
                ci_binds.push(GOOD_MIN_CI);
                bind_idx += 2;
            }
            Some(ConditionBand::Poor) => {
                conditions.push(format!(
                    "latest_ci IS NOT NULL AND latest_ci < ${bind_idx}"
                ));
                ci_binds.push(FAIR_MIN_CI);
                bind_idx += 1;
            }
            Some(ConditionBand::NotInspected) => {
                conditions.push("latest_ci IS NULL".to_string());
            }
            None => {}
        }

        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE {} \
             ORDER BY reference_code \
             LIMIT ${bind_idx} OFFSET ${}",
            conditions.join(" AND "),
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Asset>(&query);
        for text in &text_binds {
            q = q.bind(text);
        }
        for ci in &ci_binds {
            q = q.bind(ci);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update a live asset's metadata. Absent fields keep their value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                description = COALESCE($2, description), \
                region = COALESCE($3, region), \
                depot = COALESCE($4, depot), \
                ward = COALESCE($5, ward), \
                owner = COALESCE($6, owner), \
                latitude = COALESCE($7, latitude), \
                longitude = COALESCE($8, longitude), \
                installed_on = COALESCE($9, installed_on), \
                replacement_value = COALESCE($10, replacement_value), \
                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(input.description.as_deref())
            .bind(input.region.as_deref())
            .bind(input.depot.as_deref())
            .bind(input.ward.as_deref())
            .bind(input.owner.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.installed_on)
            .bind(input.replacement_value)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an asset. Returns true if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assets SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted asset. Fails with a unique violation if the
    /// reference code has been reissued to another live asset since.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NOT NULL \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Bulk import
    // -----------------------------------------------------------------------

    /// Insert a batch of validated import rows atomically. Any failure
    /// (e.g. a duplicate reference code) rolls back the whole batch.
    pub async fn bulk_insert(
        pool: &PgPool,
        records: &[ImportAssetRecord],
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = Vec::with_capacity(records.len());

        let query = format!(
            "INSERT INTO assets (\
                reference_code, asset_class, description, \
                region, depot, ward, owner, latitude, longitude, \
                installed_on, replacement_value, latest_ci, latest_urgency\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {ASSET_COLUMNS}"
        );

        for record in records {
            let asset = sqlx::query_as::<_, Asset>(&query)
                .bind(&record.asset.reference_code)
                .bind(&record.asset.asset_class)
                .bind(record.asset.description.as_deref())
                .bind(record.asset.region.as_deref())
                .bind(record.asset.depot.as_deref())
                .bind(record.asset.ward.as_deref())
                .bind(record.asset.owner.as_deref())
                .bind(record.asset.latitude)
                .bind(record.asset.longitude)
                .bind(record.asset.installed_on)
                .bind(record.asset.replacement_value)
                .bind(record.latest_ci)
                .bind(record.latest_urgency.as_deref())
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(asset);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    // -----------------------------------------------------------------------
    // Aggregation support
    // -----------------------------------------------------------------------

    /// Project all live assets into the shape the dashboard aggregations
    /// consume.
    pub async fn observations(pool: &PgPool) -> Result<Vec<AssetObservationRow>, sqlx::Error> {
        sqlx::query_as::<_, AssetObservationRow>(
            "SELECT region, latest_ci, latest_urgency, replacement_value \
             FROM assets WHERE deleted_at IS NULL",
        )
        .fetch_all(pool)
        .await
    }

    /// Which of the given ids exist as live assets.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM assets WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids.to_vec())
        .fetch_all(pool)
        .await
    }

    /// Count live assets.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }
}
