//! Ingredient catalog route handlers.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use larder_core::IngredientId;

use crate::db::IngredientRepository;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Ingredient;
use crate::state::AppState;

/// Build the ingredients router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}

/// A catalog entry as offered to recipe and inventory forms.
#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: IngredientId,
    pub name: String,
    pub aisle: Option<String>,
    pub default_unit: Option<String>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            aisle: ingredient.aisle,
            default_unit: ingredient.default_unit,
        }
    }
}

/// List the shared catalog, ordered by name.
///
/// # Errors
///
/// 500 when the database read fails.
pub async fn list(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientResponse>>> {
    let ingredients = IngredientRepository::new(state.pool()).list().await?;

    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}
