//! Ingredient catalog domain types.

use larder_core::IngredientId;

/// A catalog ingredient.
///
/// The catalog is shared across users; recipes and inventory reference it by
/// id. `name` is unique case-insensitively so free-text recipe ingredients
/// bind to existing entries regardless of casing.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Store aisle used to group the shopping list. Entries without one
    /// land in the "Other" bucket.
    pub aisle: Option<String>,
    /// Suggested unit when adding this ingredient to inventory.
    pub default_unit: Option<String>,
}
