//! Condition Index classification.
//!
//! A Condition Index (CI) is a 0-100 score for a physical asset, higher is
//! better, derived from its most recent inspection. Every screen that
//! filters, colors, or aggregates assets uses the same fixed bands defined
//! here, so the thresholds live in exactly one place.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CI bounds and band thresholds
// ---------------------------------------------------------------------------

/// Lowest valid Condition Index.
pub const CI_MIN: f64 = 0.0;
/// Highest valid Condition Index.
pub const CI_MAX: f64 = 100.0;

/// CI at or above which an asset classifies as Excellent.
pub const EXCELLENT_MIN_CI: f64 = 80.0;
/// CI at or above which an asset classifies as Good (below Excellent).
pub const GOOD_MIN_CI: f64 = 60.0;
/// CI at or above which an asset classifies as Fair (below Good).
pub const FAIR_MIN_CI: f64 = 40.0;

// ---------------------------------------------------------------------------
// Band enum
// ---------------------------------------------------------------------------

/// Discrete classification bucket for a Condition Index.
///
/// `NotInspected` is a valid, displayable state for assets without any
/// inspection data, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionBand {
    Excellent,
    Good,
    Fair,
    Poor,
    NotInspected,
}

/// Fixed display order for band listings and charts. All five bands are
/// always reported, even when empty.
pub const BAND_DISPLAY_ORDER: [ConditionBand; 5] = [
    ConditionBand::Excellent,
    ConditionBand::Good,
    ConditionBand::Fair,
    ConditionBand::Poor,
    ConditionBand::NotInspected,
];

impl ConditionBand {
    /// Stable machine-readable name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::NotInspected => "not_inspected",
        }
    }

    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NotInspected => "Not inspected",
        }
    }

    /// Position of this band in [`BAND_DISPLAY_ORDER`].
    pub fn display_index(self) -> usize {
        match self {
            Self::Excellent => 0,
            Self::Good => 1,
            Self::Fair => 2,
            Self::Poor => 3,
            Self::NotInspected => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Clamp a Condition Index to `[CI_MIN, CI_MAX]`. NaN clamps to `CI_MIN`.
pub fn clamp_ci(ci: f64) -> f64 {
    if ci.is_nan() {
        return CI_MIN;
    }
    ci.clamp(CI_MIN, CI_MAX)
}

/// Classify a (nullable) Condition Index into its band.
///
/// Out-of-range input is clamped internally, so callers never need to
/// pre-clamp. Band ranges use inclusive lower bounds:
/// `>= 80` Excellent, `60..80` Good, `40..60` Fair, `< 40` Poor.
pub fn classify_ci(ci: Option<f64>) -> ConditionBand {
    let ci = match ci {
        Some(ci) => clamp_ci(ci),
        None => return ConditionBand::NotInspected,
    };

    if ci >= EXCELLENT_MIN_CI {
        ConditionBand::Excellent
    } else if ci >= GOOD_MIN_CI {
        ConditionBand::Good
    } else if ci >= FAIR_MIN_CI {
        ConditionBand::Fair
    } else {
        ConditionBand::Poor
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
