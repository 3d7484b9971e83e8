//! Integration tests for the dashboard aggregation endpoints, seeded
//! through the public API.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

/// Seed the canonical four-asset portfolio: one per band plus one
/// never-inspected asset.
async fn seed_assets(app: axum::Router) {
    let rows = json!([
        {"reference_code": "A-EXC",  "asset_class": "signage",   "region": "North", "latest_ci": 85.0, "replacement_value": 1000.0},
        {"reference_code": "A-FAIR", "asset_class": "signage",   "region": "North", "latest_ci": 55.0, "replacement_value": 500.0},
        {"reference_code": "A-NONE", "asset_class": "guardrail", "region": "South", "replacement_value": 250.0},
        {"reference_code": "A-POOR", "asset_class": "guardrail", "latest_ci": 10.0, "urgency_score": "4"},
    ]);
    let response = post_json(app, "/api/v1/assets/import", rows).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_reports_fixed_band_distribution(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_assets(app.clone()).await;

    let body = body_json(get(app, "/api/v1/dashboard/summary").await).await;
    let data = &body["data"];

    assert_eq!(data["asset_count"], 4);
    assert_eq!(data["inspected_count"], 3);
    assert_eq!(data["mean_ci"], 50.0);
    assert_eq!(data["replacement_value_total"], 1750.0);

    let bands = data["bands"].as_array().unwrap();
    // All five bands, fixed display order, even when empty.
    let names: Vec<&str> = bands.iter().map(|b| b["band"].as_str().unwrap()).collect();
    assert_eq!(names, ["excellent", "good", "fair", "poor", "not_inspected"]);
    let counts: Vec<i64> = bands.iter().map(|b| b["count"].as_i64().unwrap()).collect();
    assert_eq!(counts, [1, 0, 1, 1, 1]);
    assert!(bands[0]["color"].as_str().unwrap().starts_with('#'));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_of_empty_portfolio_has_no_mean(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = body_json(get(app, "/api/v1/dashboard/summary").await).await;
    let data = &body["data"];
    assert_eq!(data["asset_count"], 0);
    assert_eq!(data["mean_ci"], serde_json::Value::Null);
    assert_eq!(data["bands"].as_array().unwrap().len(), 5);
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn regions_roll_up_with_unknown_bucket_and_null_mean(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_assets(app.clone()).await;

    let body = body_json(get(app, "/api/v1/dashboard/regions").await).await;
    let regions = body["data"].as_array().unwrap();

    // Compare as a map; ordering is insertion order, not part of the
    // contract.
    let by_name = |name: &str| {
        regions
            .iter()
            .find(|r| r["region"] == name)
            .unwrap_or_else(|| panic!("missing region {name}"))
    };

    let north = by_name("North");
    assert_eq!(north["asset_count"], 2);
    assert_eq!(north["mean_ci"], 70.0);
    assert_eq!(north["poor_count"], 0);
    assert_eq!(north["replacement_value_total"], 1500.0);

    // South has one asset and it was never inspected: the mean must be
    // null, not a fake zero.
    let south = by_name("South");
    assert_eq!(south["asset_count"], 1);
    assert_eq!(south["mean_ci"], serde_json::Value::Null);

    let unknown = by_name("Unknown");
    assert_eq!(unknown["asset_count"], 1);
    assert_eq!(unknown["poor_count"], 1);
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn urgency_distribution_has_fixed_shape(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_assets(app.clone()).await;

    let body = body_json(get(app, "/api/v1/dashboard/urgency").await).await;
    let slices = body["data"].as_array().unwrap();
    assert_eq!(slices.len(), 7);

    // Ordinal order R, 0..4, then the unclassified bucket.
    assert_eq!(slices[0]["level"], "R");
    assert_eq!(slices[5]["level"], "4");
    assert_eq!(slices[5]["count"], 1);
    assert_eq!(slices[6]["level"], serde_json::Value::Null);
    assert_eq!(slices[6]["label"], "Unclassified");
    assert_eq!(slices[6]["count"], 3);
}

// ---------------------------------------------------------------------------
// Cost trend
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cost_trend_buckets_by_month(pool: PgPool) {
    let app = common::build_test_app(pool);

    let today = chrono::Utc::now().date_naive();
    for cost in [100.0, 250.0] {
        let response = post_json(
            app.clone(),
            "/api/v1/work-orders",
            json!({"title": "Repair", "scheduled_for": today.to_string(), "estimated_cost": cost}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // A cancelled order must not contribute to the trend.
    let body = body_json(
        post_json(
            app.clone(),
            "/api/v1/work-orders",
            json!({"title": "Abandoned", "scheduled_for": today.to_string(), "estimated_cost": 999.0}),
        )
        .await,
    )
    .await;
    let cancelled_id = body["data"]["id"].as_i64().unwrap();
    patch_json(
        app.clone(),
        &format!("/api/v1/work-orders/{cancelled_id}/status"),
        json!({"status": "cancelled"}),
    )
    .await;

    let body = body_json(get(app, "/api/v1/dashboard/cost-trend?months=3").await).await;
    let trend = body["data"].as_array().unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0]["month"], today.format("%Y-%m").to_string());
    assert_eq!(trend[0]["order_count"], 2);
    assert_eq!(trend[0]["estimated_total"], 350.0);
}
