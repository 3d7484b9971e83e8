//! DERU component defect scoring.
//!
//! An inspection records one rating per physical component of the asset:
//! Degree (how severe), Extent (how widespread), and Relevancy (how much
//! the component matters structurally), each on a 0-5 scale. A component's
//! composite score is the product of the three, so scores range 0-125.
//! The inspection's overall score is its worst component -- a single
//! failed component drives the whole asset's urgency.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::urgency::{urgency_from_deru, UrgencyLevel};
use crate::validation::validate_closed_range;

// ---------------------------------------------------------------------------
// Rating scale
// ---------------------------------------------------------------------------

/// Lowest rating on the Degree/Extent/Relevancy scale.
pub const RATING_MIN: i16 = 0;
/// Highest rating on the Degree/Extent/Relevancy scale.
pub const RATING_MAX: i16 = 5;

/// Maximum possible component score (5 x 5 x 5).
pub const DERU_SCORE_MAX: f64 = 125.0;

/// Maximum length for a component name.
pub const MAX_COMPONENT_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Component rating
// ---------------------------------------------------------------------------

/// One component's defect measurement within an inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRating {
    /// Component name, e.g. "post", "panel", "foundation".
    pub component: String,
    pub degree: i16,
    pub extent: i16,
    pub relevancy: i16,
}

impl ComponentRating {
    /// Validate the component name and all three rating values.
    pub fn validate(&self) -> Result<(), CoreError> {
        let name = self.component.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "Component name must not be empty".to_string(),
            ));
        }
        if name.len() > MAX_COMPONENT_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Component name must be at most {MAX_COMPONENT_NAME_LEN} characters"
            )));
        }
        validate_rating(self.degree, "degree")?;
        validate_rating(self.extent, "extent")?;
        validate_rating(self.relevancy, "relevancy")?;
        Ok(())
    }

    /// Composite defect score for this component: degree x extent x relevancy.
    pub fn deru_score(&self) -> f64 {
        f64::from(self.degree) * f64::from(self.extent) * f64::from(self.relevancy)
    }
}

/// Validate a single Degree/Extent/Relevancy value.
pub fn validate_rating(value: i16, name: &str) -> Result<(), CoreError> {
    validate_closed_range(
        f64::from(value),
        f64::from(RATING_MIN),
        f64::from(RATING_MAX),
        name,
    )
}

// ---------------------------------------------------------------------------
// Inspection roll-up
// ---------------------------------------------------------------------------

/// Overall DERU score for an inspection: the worst (highest) component
/// score. `None` when the inspection recorded no components.
pub fn inspection_deru_score(components: &[ComponentRating]) -> Option<f64> {
    components
        .iter()
        .map(ComponentRating::deru_score)
        .fold(None, |worst, score| {
            Some(worst.map_or(score, |w: f64| w.max(score)))
        })
}

/// Derive the inspection's urgency from its component ratings.
pub fn derive_urgency(components: &[ComponentRating]) -> Option<UrgencyLevel> {
    inspection_deru_score(components).map(urgency_from_deru)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
