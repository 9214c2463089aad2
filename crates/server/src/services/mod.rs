//! Business logic services.
//!
//! The grocery aggregator and the suggestion engine are pure functions over
//! a snapshot of the user's recipes and inventory; they do no I/O and take
//! no locks. `auth` wraps registration and bearer-token login.

pub mod auth;
pub mod grocery;
pub mod suggestions;

use rust_decimal::Decimal;

use larder_core::parse_quantity;

/// Parse a quantity string, treating malformed input as zero.
///
/// One unparseable line must never abort a whole aggregation; it is logged
/// and contributes nothing.
pub(crate) fn parse_or_zero(raw: &str, ingredient: &str) -> Decimal {
    parse_quantity(raw).unwrap_or_else(|| {
        tracing::warn!(ingredient, quantity = raw, "Unparseable quantity treated as zero");
        Decimal::ZERO
    })
}
