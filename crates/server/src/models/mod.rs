//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types (in `db/`) and wire types (beside their route handlers).

pub mod ingredient;
pub mod inventory;
pub mod recipe;
pub mod user;

pub use ingredient::Ingredient;
pub use inventory::InventoryItem;
pub use recipe::{NewRecipe, NewRecipeIngredient, Recipe, RecipeIngredient};
pub use user::User;
