//! Presentation lookup tables.
//!
//! Classification logic returns abstract enums; mapping those to display
//! colors is a presentation concern and lives here, in one place, instead
//! of being scattered across chart and table code.

use crate::condition::ConditionBand;
use crate::urgency::UrgencyLevel;

/// Hex color for a condition band.
pub const fn band_color(band: ConditionBand) -> &'static str {
    match band {
        ConditionBand::Excellent => "#2e7d32",
        ConditionBand::Good => "#7cb342",
        ConditionBand::Fair => "#f9a825",
        ConditionBand::Poor => "#d32f2f",
        ConditionBand::NotInspected => "#9e9e9e",
    }
}

/// Hex color for an urgency level.
pub const fn urgency_color(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Record => "#78909c",
        UrgencyLevel::Monitor => "#2e7d32",
        UrgencyLevel::Routine => "#7cb342",
        UrgencyLevel::LongTerm => "#f9a825",
        UrgencyLevel::ShortTerm => "#ef6c00",
        UrgencyLevel::Immediate => "#d32f2f",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::BAND_DISPLAY_ORDER;
    use crate::urgency::URGENCY_ORDER;

    #[test]
    fn band_colors_are_distinct_hex() {
        let colors: Vec<_> = BAND_DISPLAY_ORDER.iter().map(|&b| band_color(b)).collect();
        for color in &colors {
            assert!(color.starts_with('#') && color.len() == 7, "{color}");
        }
        let mut dedup = colors.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), colors.len());
    }

    #[test]
    fn worst_band_and_urgency_share_the_alarm_color() {
        assert_eq!(
            band_color(ConditionBand::Poor),
            urgency_color(UrgencyLevel::Immediate)
        );
    }

    #[test]
    fn every_urgency_level_has_a_color() {
        for &level in &URGENCY_ORDER {
            assert!(urgency_color(level).starts_with('#'));
        }
    }
}
