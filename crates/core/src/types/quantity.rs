//! Quantity string parsing and formatting.
//!
//! Recipe and inventory quantities are stored and transmitted as
//! decimal-like strings: `"2"`, `"1.5"`, `"1/2"`. All arithmetic happens on
//! [`Decimal`] so that subtracting inventory from requirements is exact and
//! the "drop lines at zero" rule never suffers float rounding.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a quantity string into a [`Decimal`].
///
/// Accepts plain integers (`"2"`), decimals (`"1.5"`), and simple fractions
/// (`"1/2"`). Surrounding whitespace is ignored. Returns `None` for empty or
/// malformed input, including division by zero and mixed numbers (`"1 1/2"`).
///
/// Callers treat `None` as a zero quantity; a malformed line must never
/// abort a whole aggregation.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some((numerator, denominator)) = raw.split_once('/') {
        let numerator = Decimal::from_str(numerator.trim()).ok()?;
        let denominator = Decimal::from_str(denominator.trim()).ok()?;
        if denominator.is_zero() {
            return None;
        }
        return numerator.checked_div(denominator);
    }

    Decimal::from_str(raw).ok()
}

/// Format a quantity back into a display string.
///
/// Rounds to two decimal places and strips trailing zeros, so `2.00`
/// renders as `"2"` and `0.50` as `"0.5"`.
#[must_use]
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.round_dp(2).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).expect("literal decimal")
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_quantity("2"), Some(d("2")));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_quantity("1.5"), Some(d("1.5")));
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_quantity("1/2"), Some(d("0.5")));
        assert_eq!(parse_quantity("3/4"), Some(d("0.75")));
    }

    #[test]
    fn test_parse_fraction_with_spaces() {
        assert_eq!(parse_quantity(" 1 / 2 "), Some(d("0.5")));
    }

    #[test]
    fn test_parse_whitespace_trimmed() {
        assert_eq!(parse_quantity("  2.25 "), Some(d("2.25")));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_quantity("a pinch"), None);
        assert_eq!(parse_quantity("two"), None);
    }

    #[test]
    fn test_parse_mixed_number_rejected() {
        // "1 1/2" is not supported, same as the rest of the pipeline
        assert_eq!(parse_quantity("1 1/2"), None);
    }

    #[test]
    fn test_parse_division_by_zero() {
        assert_eq!(parse_quantity("1/0"), None);
    }

    #[test]
    fn test_format_strips_trailing_zeros() {
        assert_eq!(format_quantity(d("2.00")), "2");
        assert_eq!(format_quantity(d("0.50")), "0.5");
    }

    #[test]
    fn test_format_rounds_to_two_places() {
        let third = parse_quantity("1/3").expect("parses");
        assert_eq!(format_quantity(third), "0.33");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for raw in ["2", "1.5", "0.25"] {
            let parsed = parse_quantity(raw).expect("parses");
            assert_eq!(format_quantity(parsed), raw);
        }
    }
}
