//! Asset classes, reference codes, and field validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{validate_closed_range, validate_non_negative};

// ---------------------------------------------------------------------------
// Asset class constants
// ---------------------------------------------------------------------------

pub const CLASS_SIGNAGE: &str = "signage";
pub const CLASS_GUARDRAIL: &str = "guardrail";
pub const CLASS_TRAFFIC_SIGNAL: &str = "traffic_signal";
pub const CLASS_GANTRY: &str = "gantry";
pub const CLASS_FENCE: &str = "fence";
pub const CLASS_SAFETY_BARRIER: &str = "safety_barrier";
pub const CLASS_GUIDEPOST: &str = "guidepost";
pub const CLASS_ROAD_MARKING: &str = "road_marking";
pub const CLASS_RAISED_ROAD_MARKER: &str = "raised_road_marker";

/// All valid asset classes.
pub const VALID_ASSET_CLASSES: &[&str] = &[
    CLASS_SIGNAGE,
    CLASS_GUARDRAIL,
    CLASS_TRAFFIC_SIGNAL,
    CLASS_GANTRY,
    CLASS_FENCE,
    CLASS_SAFETY_BARRIER,
    CLASS_GUIDEPOST,
    CLASS_ROAD_MARKING,
    CLASS_RAISED_ROAD_MARKER,
];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length for an asset reference code.
pub const MAX_REFERENCE_CODE_LEN: usize = 64;

/// Maximum number of rows in a single bulk import request.
pub const MAX_IMPORT_ROWS: usize = 1_000;

pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

// ---------------------------------------------------------------------------
// Asset class enum
// ---------------------------------------------------------------------------

/// The kind of physical infrastructure an asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Signage,
    Guardrail,
    TrafficSignal,
    Gantry,
    Fence,
    SafetyBarrier,
    Guidepost,
    RoadMarking,
    RaisedRoadMarker,
}

impl AssetClass {
    /// Return the database string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signage => CLASS_SIGNAGE,
            Self::Guardrail => CLASS_GUARDRAIL,
            Self::TrafficSignal => CLASS_TRAFFIC_SIGNAL,
            Self::Gantry => CLASS_GANTRY,
            Self::Fence => CLASS_FENCE,
            Self::SafetyBarrier => CLASS_SAFETY_BARRIER,
            Self::Guidepost => CLASS_GUIDEPOST,
            Self::RoadMarking => CLASS_ROAD_MARKING,
            Self::RaisedRoadMarker => CLASS_RAISED_ROAD_MARKER,
        }
    }

    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Signage => "Signage",
            Self::Guardrail => "Guardrail",
            Self::TrafficSignal => "Traffic Signal",
            Self::Gantry => "Gantry",
            Self::Fence => "Fence",
            Self::SafetyBarrier => "Safety Barrier",
            Self::Guidepost => "Guidepost",
            Self::RoadMarking => "Road Marking",
            Self::RaisedRoadMarker => "Raised Road Marker",
        }
    }

    /// Parse from a string, returning an error for unknown classes.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            CLASS_SIGNAGE => Ok(Self::Signage),
            CLASS_GUARDRAIL => Ok(Self::Guardrail),
            CLASS_TRAFFIC_SIGNAL => Ok(Self::TrafficSignal),
            CLASS_GANTRY => Ok(Self::Gantry),
            CLASS_FENCE => Ok(Self::Fence),
            CLASS_SAFETY_BARRIER => Ok(Self::SafetyBarrier),
            CLASS_GUIDEPOST => Ok(Self::Guidepost),
            CLASS_ROAD_MARKING => Ok(Self::RoadMarking),
            CLASS_RAISED_ROAD_MARKER => Ok(Self::RaisedRoadMarker),
            other => Err(CoreError::Validation(format!(
                "Unknown asset class: '{other}'. Valid classes: {}",
                VALID_ASSET_CLASSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate an asset reference code.
///
/// Codes are unique within an organization and show up in exports and
/// URLs, so the charset is restricted: they must start with an ASCII
/// alphanumeric and may contain alphanumerics, `-`, `_`, `.` and `/`.
pub fn validate_reference_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation(
            "Reference code must not be empty".to_string(),
        ));
    }
    if code.len() > MAX_REFERENCE_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Reference code must be at most {MAX_REFERENCE_CODE_LEN} characters"
        )));
    }
    let mut chars = code.chars();
    let first = chars.next().unwrap_or(' ');
    if !first.is_ascii_alphanumeric() {
        return Err(CoreError::Validation(
            "Reference code must start with a letter or digit".to_string(),
        ));
    }
    if let Some(bad) = chars.find(|c| !c.is_ascii_alphanumeric() && !"-_./".contains(*c)) {
        return Err(CoreError::Validation(format!(
            "Reference code contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Validate an optional coordinate pair. Latitude and longitude must be
/// provided together or not at all.
pub fn validate_geolocation(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => {
            validate_closed_range(lat, LATITUDE_MIN, LATITUDE_MAX, "latitude")?;
            validate_closed_range(lon, LONGITUDE_MIN, LONGITUDE_MAX, "longitude")?;
            Ok(())
        }
        _ => Err(CoreError::Validation(
            "Latitude and longitude must be provided together".to_string(),
        )),
    }
}

/// Validate an optional replacement value.
pub fn validate_replacement_value(value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_non_negative(v, "replacement_value"),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- asset class round-trips --

    #[test]
    fn every_valid_class_parses() {
        for name in VALID_ASSET_CLASSES {
            let class = AssetClass::from_str(name).unwrap();
            assert_eq!(class.as_str(), *name);
        }
    }

    #[test]
    fn unknown_class_rejected_with_valid_list() {
        let err = AssetClass::from_str("bollard").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bollard"));
        assert!(msg.contains(CLASS_SIGNAGE));
    }

    // -- reference codes --

    #[test]
    fn accepts_typical_reference_codes() {
        assert!(validate_reference_code("SGN-00412").is_ok());
        assert!(validate_reference_code("N1/12.4/GR-003").is_ok());
        assert!(validate_reference_code("a").is_ok());
    }

    #[test]
    fn rejects_empty_code() {
        assert!(validate_reference_code("").is_err());
    }

    #[test]
    fn rejects_overlong_code() {
        let code = "A".repeat(MAX_REFERENCE_CODE_LEN + 1);
        assert!(validate_reference_code(&code).is_err());
    }

    #[test]
    fn rejects_leading_punctuation_and_bad_chars() {
        assert!(validate_reference_code("-SGN-1").is_err());
        assert!(validate_reference_code("SGN 1").is_err());
        assert!(validate_reference_code("SGN#1").is_err());
    }

    // -- geolocation --

    #[test]
    fn geolocation_both_or_neither() {
        assert!(validate_geolocation(None, None).is_ok());
        assert!(validate_geolocation(Some(-33.9), Some(18.4)).is_ok());
        assert!(validate_geolocation(Some(-33.9), None).is_err());
        assert!(validate_geolocation(None, Some(18.4)).is_err());
    }

    #[test]
    fn geolocation_range_boundaries() {
        assert!(validate_geolocation(Some(90.0), Some(180.0)).is_ok());
        assert!(validate_geolocation(Some(-90.0), Some(-180.0)).is_ok());
        assert!(validate_geolocation(Some(90.01), Some(0.0)).is_err());
        assert!(validate_geolocation(Some(0.0), Some(-180.01)).is_err());
    }

    // -- replacement value --

    #[test]
    fn replacement_value_must_be_non_negative() {
        assert!(validate_replacement_value(None).is_ok());
        assert!(validate_replacement_value(Some(0.0)).is_ok());
        assert!(validate_replacement_value(Some(125_000.0)).is_ok());
        assert!(validate_replacement_value(Some(-1.0)).is_err());
    }
}
