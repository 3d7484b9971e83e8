//! Urgency classification and legacy-field resolution.
//!
//! Urgency is an ordinal scale describing how soon remedial action is
//! required: `R` (record only) < `0` (monitor) < `1` (routine) < `2`
//! (long-term repair) < `3` (short-term repair) < `4` (immediate).
//!
//! Historical data carries urgency under several field names, and under
//! several representations (an explicit level, a `D-E-R-U` composite
//! string, or a raw numeric DERU score). [`resolve_urgency`] reduces all
//! of them to a single level via a fixed-precedence accessor chain.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// DERU score thresholds
// ---------------------------------------------------------------------------

/// DERU score strictly above which urgency is `4` (immediate).
pub const DERU_IMMEDIATE_MIN: f64 = 120.0;
/// DERU score at or above which urgency is `3` (short-term repair).
pub const DERU_SHORT_TERM_MIN: f64 = 80.0;
/// DERU score at or above which urgency is `2` (long-term repair).
pub const DERU_LONG_TERM_MIN: f64 = 40.0;
/// DERU score at or above which urgency is `1` (routine).
pub const DERU_ROUTINE_MIN: f64 = 20.0;

// ---------------------------------------------------------------------------
// Urgency level
// ---------------------------------------------------------------------------

/// Ordinal urgency classification. Declaration order is the ordinal
/// order, so the derived `Ord` ranks `Record` lowest and `Immediate`
/// highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyLevel {
    /// "R" -- defect recorded, no action required.
    #[serde(rename = "R")]
    Record,
    /// "0" -- monitor at the next inspection cycle.
    #[serde(rename = "0")]
    Monitor,
    /// "1" -- routine maintenance.
    #[serde(rename = "1")]
    Routine,
    /// "2" -- long-term repair.
    #[serde(rename = "2")]
    LongTerm,
    /// "3" -- short-term repair.
    #[serde(rename = "3")]
    ShortTerm,
    /// "4" -- immediate attention.
    #[serde(rename = "4")]
    Immediate,
}

/// All urgency levels in ordinal order, for fixed-shape distributions.
pub const URGENCY_ORDER: [UrgencyLevel; 6] = [
    UrgencyLevel::Record,
    UrgencyLevel::Monitor,
    UrgencyLevel::Routine,
    UrgencyLevel::LongTerm,
    UrgencyLevel::ShortTerm,
    UrgencyLevel::Immediate,
];

impl UrgencyLevel {
    /// Stable machine-readable form ("R", "0".."4"), matching serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Record => "R",
            Self::Monitor => "0",
            Self::Routine => "1",
            Self::LongTerm => "2",
            Self::ShortTerm => "3",
            Self::Immediate => "4",
        }
    }

    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Record => "Record only",
            Self::Monitor => "Monitor",
            Self::Routine => "Routine maintenance",
            Self::LongTerm => "Long-term repair",
            Self::ShortTerm => "Short-term repair",
            Self::Immediate => "Immediate attention",
        }
    }

    /// Ordinal rank, 0 (Record) through 5 (Immediate).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parse a level from its lenient string forms.
    ///
    /// Accepts "R"/"r", the digits "0".."4", and integral numeric strings
    /// such as "2.0" (legacy exports store levels as numbers). Anything
    /// else is not a usable signal and yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("R") {
            return Some(Self::Record);
        }
        match s {
            "0" => Some(Self::Monitor),
            "1" => Some(Self::Routine),
            "2" => Some(Self::LongTerm),
            "3" => Some(Self::ShortTerm),
            "4" => Some(Self::Immediate),
            other => {
                let n: f64 = other.parse().ok()?;
                if n.fract() != 0.0 || !(0.0..=4.0).contains(&n) {
                    return None;
                }
                Some(match n as u8 {
                    0 => Self::Monitor,
                    1 => Self::Routine,
                    2 => Self::LongTerm,
                    3 => Self::ShortTerm,
                    _ => Self::Immediate,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DERU score conversion
// ---------------------------------------------------------------------------

/// Convert a numeric DERU score to an urgency level via the fixed
/// threshold table. Negative scores degrade to `0` (monitor).
///
/// Note the asymmetry at the top: 120 itself is still `3`; only scores
/// strictly above 120 classify as `4`.
pub fn urgency_from_deru(score: f64) -> UrgencyLevel {
    if score > DERU_IMMEDIATE_MIN {
        UrgencyLevel::Immediate
    } else if score >= DERU_SHORT_TERM_MIN {
        UrgencyLevel::ShortTerm
    } else if score >= DERU_LONG_TERM_MIN {
        UrgencyLevel::LongTerm
    } else if score >= DERU_ROUTINE_MIN {
        UrgencyLevel::Routine
    } else {
        UrgencyLevel::Monitor
    }
}

// ---------------------------------------------------------------------------
// D-E-R-U composite strings
// ---------------------------------------------------------------------------

/// Extract the urgency component from a structured `"D-E-R-U"` composite
/// string (e.g. `"3-2-1-2"` or `"2-1-3-R"`). The urgency component is the
/// fourth dash-separated segment. Malformed composites yield `None`.
pub fn parse_deru_composite(s: &str) -> Option<UrgencyLevel> {
    let mut parts = s.split('-').map(str::trim);
    let (_d, _e, _r) = (parts.next()?, parts.next()?, parts.next()?);
    let u = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    UrgencyLevel::parse(u)
}

// ---------------------------------------------------------------------------
// Legacy field resolution
// ---------------------------------------------------------------------------

/// The urgency-bearing fields a raw asset record may carry. Legacy data
/// uses all of these names; any subset may be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrgencySignals {
    /// Explicit urgency level, numeric or string ("2", 2, "R").
    #[serde(default, deserialize_with = "de_string_or_number")]
    pub urgency_score: Option<String>,
    /// Structured "D-E-R-U" composite string.
    #[serde(default)]
    pub calculated_urgency: Option<String>,
    /// Raw numeric DERU score, converted via the threshold table.
    #[serde(default)]
    pub latest_deru: Option<f64>,
    /// Legacy plain urgency field.
    #[serde(default, deserialize_with = "de_string_or_number")]
    pub urgency: Option<String>,
    /// Legacy denormalized urgency field.
    #[serde(default, deserialize_with = "de_string_or_number")]
    pub latest_urgency: Option<String>,
}

fn from_urgency_score(s: &UrgencySignals) -> Option<UrgencyLevel> {
    s.urgency_score.as_deref().and_then(UrgencyLevel::parse)
}

fn from_calculated_urgency(s: &UrgencySignals) -> Option<UrgencyLevel> {
    s.calculated_urgency.as_deref().and_then(parse_deru_composite)
}

fn from_latest_deru(s: &UrgencySignals) -> Option<UrgencyLevel> {
    s.latest_deru.map(urgency_from_deru)
}

fn from_urgency_field(s: &UrgencySignals) -> Option<UrgencyLevel> {
    s.urgency.as_deref().and_then(UrgencyLevel::parse)
}

fn from_latest_urgency(s: &UrgencySignals) -> Option<UrgencyLevel> {
    s.latest_urgency.as_deref().and_then(UrgencyLevel::parse)
}

/// An urgency source: field name plus accessor.
pub type UrgencySource = (&'static str, fn(&UrgencySignals) -> Option<UrgencyLevel>);

/// Ordered urgency sources. The first accessor that yields a usable level
/// wins; unparseable values fall through to the next source. Downstream
/// dashboards depend on this exact precedence. Supporting a new legacy
/// field is one added entry here.
pub const URGENCY_SOURCES: &[UrgencySource] = &[
    ("urgency_score", from_urgency_score),
    ("calculated_urgency", from_calculated_urgency),
    ("latest_deru", from_latest_deru),
    ("urgency", from_urgency_field),
    ("latest_urgency", from_latest_urgency),
];

/// Resolve an urgency level from whatever signals the record carries.
///
/// Never errors: a record with no usable signal resolves to `None`,
/// which is a valid, displayable "unclassified" state.
pub fn resolve_urgency(signals: &UrgencySignals) -> Option<UrgencyLevel> {
    URGENCY_SOURCES
        .iter()
        .find_map(|(_, accessor)| accessor(signals))
}

/// Accept JSON strings or numbers for score-ish fields; legacy exports
/// are inconsistent about which they emit.
fn de_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Num(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
