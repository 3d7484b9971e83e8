//! Integration tests for asset CRUD, search, soft delete, and bulk import.

use rams_core::condition::ConditionBand;
use rams_db::models::asset::{AssetSearchParams, CreateAsset, ImportAssetRecord, UpdateAsset};
use rams_db::repositories::AssetRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_asset(code: &str) -> CreateAsset {
    CreateAsset {
        reference_code: code.to_string(),
        asset_class: "signage".to_string(),
        description: Some("stop sign".to_string()),
        region: Some("North".to_string()),
        depot: None,
        ward: None,
        owner: None,
        latitude: Some(-33.92),
        longitude: Some(18.42),
        installed_on: None,
        replacement_value: Some(1500.0),
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_and_find_round_trip(pool: PgPool) {
    let created = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();
    assert_eq!(created.reference_code, "SGN-001");
    assert_eq!(created.latest_ci, None);

    let found = AssetRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found.unwrap().id, created.id);
}

#[sqlx::test]
async fn duplicate_reference_code_is_rejected(pool: PgPool) {
    AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();

    let err = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, sqlx::Error::Database(_)),
        "duplicate code should violate uq_assets_reference_code"
    );
}

#[sqlx::test]
async fn update_keeps_absent_fields(pool: PgPool) {
    let created = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();

    let updated = AssetRepo::update(
        &pool,
        created.id,
        &UpdateAsset {
            region: Some("South".to_string()),
            ..UpdateAsset::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.region.as_deref(), Some("South"));
    // Untouched fields survive the partial update.
    assert_eq!(updated.description.as_deref(), Some("stop sign"));
    assert_eq!(updated.replacement_value, Some(1500.0));
}

// ---------------------------------------------------------------------------
// Soft delete / restore
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn soft_delete_hides_from_find_and_search(pool: PgPool) {
    let created = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();

    let deleted = AssetRepo::soft_delete(&pool, created.id).await.unwrap();
    assert!(deleted, "soft_delete should return true on first call");

    assert!(AssetRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
    let results = AssetRepo::search(&pool, &AssetSearchParams::default())
        .await
        .unwrap();
    assert!(results.is_empty());

    // Second call is a no-op.
    let deleted_again = AssetRepo::soft_delete(&pool, created.id).await.unwrap();
    assert!(!deleted_again);
}

#[sqlx::test]
async fn restore_makes_asset_visible_again(pool: PgPool) {
    let created = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();
    AssetRepo::soft_delete(&pool, created.id).await.unwrap();

    let restored = AssetRepo::restore(&pool, created.id).await.unwrap();
    assert!(restored.is_some());
    assert!(AssetRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test]
async fn deleted_code_can_be_reissued_then_restore_conflicts(pool: PgPool) {
    let first = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();
    AssetRepo::soft_delete(&pool, first.id).await.unwrap();

    // The partial unique index only covers live rows.
    AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();

    let err = AssetRepo::restore(&pool, first.id).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn search_filters_by_band(pool: PgPool) {
    AssetRepo::create(&pool, &new_asset("SGN-EXC"), Some(85.0), Some("0"))
        .await
        .unwrap();
    AssetRepo::create(&pool, &new_asset("SGN-FAIR"), Some(45.0), Some("2"))
        .await
        .unwrap();
    AssetRepo::create(&pool, &new_asset("SGN-NONE"), None, None)
        .await
        .unwrap();

    let excellent = AssetRepo::search(
        &pool,
        &AssetSearchParams {
            band: Some(ConditionBand::Excellent),
            ..AssetSearchParams::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(excellent.len(), 1);
    assert_eq!(excellent[0].reference_code, "SGN-EXC");

    let not_inspected = AssetRepo::search(
        &pool,
        &AssetSearchParams {
            band: Some(ConditionBand::NotInspected),
            ..AssetSearchParams::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(not_inspected.len(), 1);
    assert_eq!(not_inspected[0].reference_code, "SGN-NONE");
}

#[sqlx::test]
async fn search_combines_filters(pool: PgPool) {
    let mut guardrail = new_asset("GR-001");
    guardrail.asset_class = "guardrail".to_string();
    guardrail.region = Some("South".to_string());
    AssetRepo::create(&pool, &guardrail, Some(70.0), None)
        .await
        .unwrap();
    AssetRepo::create(&pool, &new_asset("SGN-001"), Some(70.0), None)
        .await
        .unwrap();

    let results = AssetRepo::search(
        &pool,
        &AssetSearchParams {
            asset_class: Some("guardrail".to_string()),
            region: Some("South".to_string()),
            band: Some(ConditionBand::Good),
            ..AssetSearchParams::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].reference_code, "GR-001");
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn bulk_insert_is_atomic(pool: PgPool) {
    let good = ImportAssetRecord {
        asset: new_asset("SGN-100"),
        latest_ci: Some(62.5),
        latest_urgency: Some("1".to_string()),
    };
    let duplicate = ImportAssetRecord {
        asset: new_asset("SGN-100"),
        latest_ci: None,
        latest_urgency: None,
    };

    let err = AssetRepo::bulk_insert(&pool, &[good.clone(), duplicate])
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));
    // The whole batch rolled back.
    assert_eq!(AssetRepo::count(&pool).await.unwrap(), 0);

    let inserted = AssetRepo::bulk_insert(&pool, &[good]).await.unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].latest_ci, Some(62.5));
    assert_eq!(inserted[0].latest_urgency.as_deref(), Some("1"));
}

#[sqlx::test]
async fn existing_ids_reports_only_live_assets(pool: PgPool) {
    let a = AssetRepo::create(&pool, &new_asset("SGN-001"), None, None)
        .await
        .unwrap();
    let b = AssetRepo::create(&pool, &new_asset("SGN-002"), None, None)
        .await
        .unwrap();
    AssetRepo::soft_delete(&pool, b.id).await.unwrap();

    let found = AssetRepo::existing_ids(&pool, &[a.id, b.id, 999_999])
        .await
        .unwrap();
    assert_eq!(found, vec![a.id]);
}
