//! Recipe route handlers.
//!
//! Ingredient lines arrive as either a catalog id or a free-text name; on
//! create and update, free-text names that match a catalog entry
//! case-insensitively bind to that entry's id, so the catalog never grows a
//! duplicate just because the user typed "flour" instead of picking it.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, RecipeId, RecipeIngredientId};

use crate::db::{IngredientRepository, InventoryRepository, RecipeRepository};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{NewRecipe, NewRecipeIngredient, Recipe};
use crate::services::grocery::CrossUnitPolicy;
use crate::services::suggestions::{RecipeMatch, suggest_recipes};
use crate::state::AppState;

/// Build the recipes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/suggestions", get(suggestions))
        .route("/clear-selection", post(clear_selection))
        .route("/{id}", get(show).put(update))
        .route("/{id}/select", patch(select))
}

/// One ingredient line in a recipe response, with the catalog name
/// flattened in for bound lines.
#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: RecipeIngredientId,
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

/// Full recipe response.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: RecipeId,
    pub title: String,
    pub servings: i32,
    pub instructions: Option<String>,
    pub is_selected: bool,
    pub ingredients: Vec<RecipeIngredientResponse>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            servings: recipe.servings,
            instructions: recipe.instructions,
            is_selected: recipe.is_selected,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(|line| RecipeIngredientResponse {
                    id: line.id,
                    ingredient_id: line.ingredient_id,
                    name: line.name,
                    quantity: line.quantity,
                    unit: line.unit,
                })
                .collect(),
        }
    }
}

/// One ingredient line in a create/update request: a catalog id, a
/// free-text name, or both.
#[derive(Debug, Deserialize)]
pub struct RecipeIngredientRequest {
    #[serde(default)]
    pub ingredient_id: Option<IngredientId>,
    #[serde(default)]
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request body for creating or replacing a recipe.
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub servings: i32,
    #[serde(default)]
    pub instructions: Option<String>,
    pub ingredients: Vec<RecipeIngredientRequest>,
}

/// Request body for toggling the selection flag.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub is_selected: bool,
}

/// Response body for clearing the selection.
#[derive(Debug, Serialize)]
pub struct ClearSelectionResponse {
    pub cleared: u64,
}

/// List the user's recipes.
///
/// # Errors
///
/// 500 when the database read fails.
pub async fn list(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>> {
    let recipes = RecipeRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// Get one recipe, including its instructions.
///
/// # Errors
///
/// 404 when the recipe does not belong to the user.
pub async fn show(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
) -> Result<Json<RecipeResponse>> {
    let recipe = RecipeRepository::new(state.pool())
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_owned()))?;

    Ok(Json(recipe.into()))
}

/// Create a recipe.
///
/// # Errors
///
/// 400 for an empty title, non-positive servings, or a nameless line.
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>)> {
    let new_recipe = resolve_recipe(&state, body).await?;
    let recipe = RecipeRepository::new(state.pool())
        .create(user.id, &new_recipe)
        .await?;

    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Replace a recipe, swapping its whole ingredient list.
///
/// # Errors
///
/// 404 when the recipe does not belong to the user; 400 for invalid input.
pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
    Json(body): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>> {
    let new_recipe = resolve_recipe(&state, body).await?;
    let recipe = RecipeRepository::new(state.pool())
        .replace(id, user.id, &new_recipe)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_owned()))?;

    Ok(Json(recipe.into()))
}

/// Toggle whether a recipe is part of the current cooking plan.
///
/// # Errors
///
/// 404 when the recipe does not belong to the user.
pub async fn select(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<RecipeResponse>> {
    let recipe = RecipeRepository::new(state.pool())
        .set_selected(id, user.id, body.is_selected)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_owned()))?;

    Ok(Json(recipe.into()))
}

/// Deselect every recipe, emptying the cooking plan.
///
/// # Errors
///
/// 500 when the database write fails.
pub async fn clear_selection(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ClearSelectionResponse>> {
    let cleared = RecipeRepository::new(state.pool())
        .clear_selection(user.id)
        .await?;

    Ok(Json(ClearSelectionResponse { cleared }))
}

/// Score every recipe against current inventory, most-cookable first.
///
/// # Errors
///
/// 500 when a database read fails.
pub async fn suggestions(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeMatch>>> {
    let recipes = RecipeRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    let inventory = InventoryRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(suggest_recipes(
        &recipes,
        &inventory,
        CrossUnitPolicy::default(),
    )))
}

/// Validate a recipe request and resolve its ingredient lines against the
/// catalog.
async fn resolve_recipe(state: &AppState, body: RecipeRequest) -> Result<NewRecipe> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_owned()));
    }
    if body.servings < 1 {
        return Err(AppError::BadRequest(
            "Servings must be at least 1".to_owned(),
        ));
    }

    let ingredients = IngredientRepository::new(state.pool());
    let mut resolved = Vec::with_capacity(body.ingredients.len());
    for line in body.ingredients {
        let name = line.name.trim();
        let (ingredient_id, name) = match line.ingredient_id {
            Some(id) => {
                let entry = ingredients.get_by_id(id).await?.ok_or_else(|| {
                    AppError::BadRequest("Unknown ingredient id".to_owned())
                })?;
                let name = if name.is_empty() {
                    entry.name
                } else {
                    name.to_owned()
                };
                (Some(id), name)
            }
            None => {
                if name.is_empty() {
                    return Err(AppError::BadRequest(
                        "Ingredient lines need a name or a catalog id".to_owned(),
                    ));
                }
                // Free-text names bind to the catalog case-insensitively;
                // unmatched names are kept unresolved on the line.
                match ingredients.find_by_name(name).await? {
                    Some(entry) => (Some(entry.id), entry.name),
                    None => (None, name.to_owned()),
                }
            }
        };

        resolved.push(NewRecipeIngredient {
            ingredient_id,
            name,
            quantity: line.quantity,
            unit: line.unit,
        });
    }

    Ok(NewRecipe {
        title: title.to_owned(),
        servings: body.servings,
        instructions: body.instructions,
        ingredients: resolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_line_accepts_id_or_name() {
        let with_id: RecipeIngredientRequest = serde_json::from_str(
            r#"{"ingredient_id": "00000000-0000-0000-0000-000000000000", "quantity": "2", "unit": "cups"}"#,
        )
        .expect("deserializes");
        assert!(with_id.ingredient_id.is_some());
        assert!(with_id.name.is_empty());

        let with_name: RecipeIngredientRequest =
            serde_json::from_str(r#"{"name": "flour", "quantity": "1/2"}"#).expect("deserializes");
        assert!(with_name.ingredient_id.is_none());
        assert_eq!(with_name.name, "flour");
        assert!(with_name.unit.is_none());
    }

    #[test]
    fn test_recipe_request_shape() {
        let body: RecipeRequest = serde_json::from_str(
            r#"{
                "title": "Pancakes",
                "servings": 4,
                "instructions": "Mix and fry.",
                "ingredients": [{"name": "Flour", "quantity": "2", "unit": "cups"}]
            }"#,
        )
        .expect("deserializes");
        assert_eq!(body.title, "Pancakes");
        assert_eq!(body.ingredients.len(), 1);
    }
}
