//! Recipe domain types.

use larder_core::{IngredientId, RecipeId, RecipeIngredientId};

/// A recipe with its ingredient lines.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub servings: i32,
    pub instructions: Option<String>,
    /// Part of the current cooking plan; drives grocery list computation.
    pub is_selected: bool,
    pub ingredients: Vec<RecipeIngredient>,
}

/// One ingredient line of a recipe.
///
/// A line is either bound to a catalog ingredient (`ingredient_id` set,
/// `name`/`aisle` mirroring the catalog) or carries a free-text name captured
/// at creation time (`ingredient_id` and `aisle` are `None`).
#[derive(Debug, Clone)]
pub struct RecipeIngredient {
    pub id: RecipeIngredientId,
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    /// Decimal-like quantity string, e.g. `"2"`, `"1.5"`, `"1/2"`.
    pub quantity: String,
    pub unit: Option<String>,
    /// Store aisle from the catalog entry, when bound.
    pub aisle: Option<String>,
}

/// Input for creating or replacing a recipe.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub servings: i32,
    pub instructions: Option<String>,
    pub ingredients: Vec<NewRecipeIngredient>,
}

/// One resolved ingredient line of a [`NewRecipe`].
///
/// Resolution (binding free-text names to catalog entries) happens before
/// this type is constructed; the repository stores it as-is.
#[derive(Debug, Clone)]
pub struct NewRecipeIngredient {
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}
