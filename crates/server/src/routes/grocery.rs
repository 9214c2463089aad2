//! Grocery list route handler.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, routing::get};

use crate::db::{InventoryRepository, RecipeRepository};
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::grocery::{CrossUnitPolicy, GroceryItem, generate_grocery_list};
use crate::state::AppState;

/// Build the grocery router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show))
}

/// Compute the shopping list from the selected recipes and current
/// inventory, grouped by store aisle. Always computed fresh; every
/// mutation elsewhere is reflected by the next call.
///
/// # Errors
///
/// 500 when a database read fails.
pub async fn show(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<GroceryItem>>>> {
    let selected = RecipeRepository::new(state.pool())
        .list_selected_for_user(user.id)
        .await?;
    let inventory = InventoryRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    let list = generate_grocery_list(&selected, &inventory, CrossUnitPolicy::default());

    Ok(Json(list.aisles))
}
