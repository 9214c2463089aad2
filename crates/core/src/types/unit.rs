//! Unit-string normalization.
//!
//! Larder never converts between units. `"cups"` of flour needed and
//! `"g"` of flour on hand are different lines entirely; the only processing
//! a unit string gets is normalization so that `"Cups "` and `"cups"`
//! compare equal when grouping requirements and matching inventory.

/// Normalize a unit string for comparison and grouping.
///
/// Trims whitespace and lowercases. A missing unit normalizes to the empty
/// string, which stands for "unitless" (eggs, whole onions).
#[must_use]
pub fn normalize_unit(unit: Option<&str>) -> String {
    unit.map(str::trim).unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_unit(Some(" Cups ")), "cups");
    }

    #[test]
    fn test_none_is_unitless() {
        assert_eq!(normalize_unit(None), "");
    }

    #[test]
    fn test_empty_equals_none() {
        assert_eq!(normalize_unit(Some("  ")), normalize_unit(None));
    }

    #[test]
    fn test_distinct_units_stay_distinct() {
        assert_ne!(normalize_unit(Some("cup")), normalize_unit(Some("cups")));
    }
}
