//! Inventory route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use larder_core::{IngredientId, InventoryItemId};

use crate::db::{InventoryRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::InventoryItem;
use crate::state::AppState;

/// Build the inventory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(upsert))
        .route("/{id}", put(update).delete(delete))
}

/// Inventory item response, with the catalog name flattened in.
#[derive(Debug, Serialize)]
pub struct InventoryItemResponse {
    pub id: InventoryItemId,
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            ingredient_id: item.ingredient_id,
            ingredient_name: item.ingredient_name,
            quantity: item.quantity,
            unit: item.unit,
        }
    }
}

/// Request body for adding an item.
#[derive(Debug, Deserialize)]
pub struct InventoryCreateRequest {
    pub ingredient_id: IngredientId,
    pub quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request body for updating an item.
#[derive(Debug, Deserialize)]
pub struct InventoryUpdateRequest {
    pub quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// List the user's inventory.
///
/// # Errors
///
/// 500 when the database read fails.
pub async fn list(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItemResponse>>> {
    let items = InventoryRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(
        items.into_iter().map(InventoryItemResponse::from).collect(),
    ))
}

/// Add an ingredient to inventory. Writing an ingredient that is already
/// tracked replaces its stored quantity and unit.
///
/// # Errors
///
/// 400 when the ingredient id is not in the catalog.
pub async fn upsert(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<InventoryCreateRequest>,
) -> Result<Json<InventoryItemResponse>> {
    let item = InventoryRepository::new(state.pool())
        .upsert(
            user.id,
            body.ingredient_id,
            &body.quantity,
            body.unit.as_deref(),
        )
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::BadRequest("Unknown ingredient id".to_owned())
            }
            other => AppError::from(other),
        })?;

    Ok(Json(item.into()))
}

/// Update an item's quantity and unit.
///
/// # Errors
///
/// 404 when the item does not belong to the user.
pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<InventoryItemId>,
    Json(body): Json<InventoryUpdateRequest>,
) -> Result<Json<InventoryItemResponse>> {
    let item = InventoryRepository::new(state.pool())
        .update(id, user.id, &body.quantity, body.unit.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_owned()))?;

    Ok(Json(item.into()))
}

/// Remove an item from inventory.
///
/// # Errors
///
/// 404 when the item does not belong to the user.
pub async fn delete(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<InventoryItemId>,
) -> Result<StatusCode> {
    let deleted = InventoryRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Item not found".to_owned()));
    }

    Ok(StatusCode::NO_CONTENT)
}
