//! Inventory domain types.

use larder_core::{IngredientId, InventoryItemId};

/// An on-hand quantity of one catalog ingredient, scoped to a user.
///
/// There is at most one row per (user, ingredient); writing the same
/// ingredient again replaces the stored quantity and unit.
#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub ingredient_id: IngredientId,
    /// Catalog name, flattened for display.
    pub ingredient_name: String,
    /// Decimal-like quantity string; malformed values count as zero.
    pub quantity: String,
    pub unit: Option<String>,
}
