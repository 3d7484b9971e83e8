//! Dashboard aggregation over in-memory asset and work-order records.
//!
//! All functions here are pure and total: malformed or missing input
//! degrades to "Unknown"/"not inspected" buckets, never an error. Each
//! call receives its full input as a slice and returns a fresh result
//! without mutating anything.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::condition::{clamp_ci, classify_ci, ConditionBand, BAND_DISPLAY_ORDER};
use crate::urgency::{UrgencyLevel, URGENCY_ORDER};

/// Region bucket label for assets without a region.
pub const UNKNOWN_REGION: &str = "Unknown";

// ---------------------------------------------------------------------------
// Input shapes
// ---------------------------------------------------------------------------

/// The projection of an asset row the aggregations consume. Hosts map
/// their storage rows into this shape; the denormalized `latest_*`
/// fields are taken as given, authoritative inputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetObservation {
    pub region: Option<String>,
    pub latest_ci: Option<f64>,
    pub latest_urgency: Option<String>,
    pub replacement_value: Option<f64>,
}

/// The projection of a work order the cost trend consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct CostObservation {
    /// The date the cost is attributed to (completion date when known,
    /// otherwise the scheduled date).
    pub incurred_on: NaiveDate,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
}

// ---------------------------------------------------------------------------
// Band distribution
// ---------------------------------------------------------------------------

/// One bucket of the condition band distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub band: ConditionBand,
    pub count: i64,
}

/// Group assets by condition band.
///
/// Always returns all five bands in display order (count 0 when empty),
/// and every record lands in exactly one band, so the counts sum to the
/// input length. Deterministic and idempotent.
pub fn aggregate_by_band(records: &[AssetObservation]) -> Vec<BandCount> {
    let mut counts = [0i64; BAND_DISPLAY_ORDER.len()];
    for record in records {
        counts[classify_ci(record.latest_ci).display_index()] += 1;
    }

    BAND_DISPLAY_ORDER
        .iter()
        .map(|&band| BandCount {
            band,
            count: counts[band.display_index()],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Region roll-up
// ---------------------------------------------------------------------------

/// Per-region summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: String,
    pub asset_count: i64,
    /// Arithmetic mean CI over the region's scored assets. `None` when
    /// the region has no scored assets -- deliberately distinct from
    /// 0.0, which would be indistinguishable from "all failing".
    pub mean_ci: Option<f64>,
    /// Assets classified Poor (CI below the Fair threshold).
    pub poor_count: i64,
    pub replacement_value_total: f64,
}

#[derive(Default)]
struct RegionAccumulator {
    asset_count: i64,
    ci_sum: f64,
    ci_count: i64,
    poor_count: i64,
    replacement_value_total: f64,
}

/// Group assets by region string; missing regions bucket under
/// [`UNKNOWN_REGION`]. Output order is first-seen insertion order
/// (stable, not sorted); callers sort as needed.
pub fn aggregate_by_region(records: &[AssetObservation]) -> Vec<RegionSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<String, RegionAccumulator> = HashMap::new();

    for record in records {
        let region = record
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REGION);

        if !accumulators.contains_key(region) {
            order.push(region.to_string());
        }
        let acc = accumulators.entry(region.to_string()).or_default();

        acc.asset_count += 1;
        if let Some(ci) = record.latest_ci {
            acc.ci_sum += clamp_ci(ci);
            acc.ci_count += 1;
        }
        if classify_ci(record.latest_ci) == ConditionBand::Poor {
            acc.poor_count += 1;
        }
        if let Some(value) = record.replacement_value {
            if value.is_finite() {
                acc.replacement_value_total += value;
            }
        }
    }

    order
        .into_iter()
        .map(|region| {
            let acc = accumulators
                .remove(&region)
                .unwrap_or_default();
            let mean_ci = if acc.ci_count > 0 {
                Some(acc.ci_sum / acc.ci_count as f64)
            } else {
                None
            };
            RegionSummary {
                region,
                asset_count: acc.asset_count,
                mean_ci,
                poor_count: acc.poor_count,
                replacement_value_total: acc.replacement_value_total,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Urgency distribution
// ---------------------------------------------------------------------------

/// One bucket of the urgency distribution. `level: None` is the
/// "unclassified" bucket for assets with no usable urgency signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyCount {
    pub level: Option<UrgencyLevel>,
    pub count: i64,
}

/// Group assets by urgency level, in ordinal order (R first), with a
/// trailing unclassified bucket. All seven buckets are always present.
pub fn aggregate_by_urgency(records: &[AssetObservation]) -> Vec<UrgencyCount> {
    let mut counts = [0i64; URGENCY_ORDER.len()];
    let mut unclassified = 0i64;

    for record in records {
        match record.latest_urgency.as_deref().and_then(UrgencyLevel::parse) {
            Some(level) => counts[level.rank() as usize] += 1,
            None => unclassified += 1,
        }
    }

    URGENCY_ORDER
        .iter()
        .map(|&level| UrgencyCount {
            level: Some(level),
            count: counts[level.rank() as usize],
        })
        .chain(std::iter::once(UrgencyCount {
            level: None,
            count: unclassified,
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly cost trend
// ---------------------------------------------------------------------------

/// Aggregated maintenance cost for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCost {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub order_count: i64,
    pub estimated_total: f64,
    pub actual_total: f64,
}

/// Bucket work-order costs by calendar month, ascending. Months with no
/// orders are absent (the chart layer fills gaps if it wants a dense
/// axis).
pub fn monthly_cost_trend(records: &[CostObservation]) -> Vec<MonthlyCost> {
    let mut months: std::collections::BTreeMap<(i32, u32), (i64, f64, f64)> =
        std::collections::BTreeMap::new();

    for record in records {
        let key = (record.incurred_on.year(), record.incurred_on.month());
        let entry = months.entry(key).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        if let Some(cost) = record.estimated_cost {
            if cost.is_finite() {
                entry.1 += cost;
            }
        }
        if let Some(cost) = record.actual_cost {
            if cost.is_finite() {
                entry.2 += cost;
            }
        }
    }

    months
        .into_iter()
        .map(|((year, month), (order_count, estimated_total, actual_total))| MonthlyCost {
            month: format!("{year:04}-{month:02}"),
            order_count,
            estimated_total,
            actual_total,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
