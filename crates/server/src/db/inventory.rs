//! Inventory repository.
//!
//! One row per (user, ingredient); `upsert` enforces that by writing through
//! the unique constraint, which is the behavior the UI's "add" form expects
//! when the same ingredient is added twice.

use sqlx::PgPool;

use larder_core::{IngredientId, InventoryItemId, UserId};

use super::RepositoryError;
use crate::models::InventoryItem;

/// Repository for inventory database operations.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

/// Internal row type for inventory queries, joined with the catalog for the
/// flattened ingredient name.
#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRow {
    id: InventoryItemId,
    ingredient_id: IngredientId,
    ingredient_name: String,
    quantity: String,
    unit: Option<String>,
}

impl From<InventoryItemRow> for InventoryItem {
    fn from(row: InventoryItemRow) -> Self {
        Self {
            id: row.id,
            ingredient_id: row.ingredient_id,
            ingredient_name: row.ingredient_name,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the user's inventory, ordered by ingredient name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<InventoryItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, InventoryItemRow>(
            r"
            SELECT inv.id, inv.ingredient_id, i.name AS ingredient_name, inv.quantity, inv.unit
            FROM inventory_items inv
            JOIN ingredients i ON i.id = inv.ingredient_id
            WHERE inv.user_id = $1
            ORDER BY i.name
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    /// Get one of the user's inventory items by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: InventoryItemId,
        user_id: UserId,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        let row = sqlx::query_as::<_, InventoryItemRow>(
            r"
            SELECT inv.id, inv.ingredient_id, i.name AS ingredient_name, inv.quantity, inv.unit
            FROM inventory_items inv
            JOIN ingredients i ON i.id = inv.ingredient_id
            WHERE inv.id = $1 AND inv.user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    /// Write an on-hand quantity, replacing any existing row for the same
    /// (user, ingredient) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ingredient does not exist
    /// in the catalog. Returns `RepositoryError::Database` for other errors.
    pub async fn upsert(
        &self,
        user_id: UserId,
        ingredient_id: IngredientId,
        quantity: &str,
        unit: Option<&str>,
    ) -> Result<InventoryItem, RepositoryError> {
        let id = sqlx::query_scalar::<_, InventoryItemId>(
            r"
            INSERT INTO inventory_items (user_id, ingredient_id, quantity, unit)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, ingredient_id)
            DO UPDATE SET quantity = EXCLUDED.quantity, unit = EXCLUDED.unit
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(ingredient_id)
        .bind(quantity)
        .bind(unit)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("ingredient does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        self.get_for_user(id, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update the quantity and unit of one of the user's inventory items.
    /// Returns `None` when the item does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: InventoryItemId,
        user_id: UserId,
        quantity: &str,
        unit: Option<&str>,
    ) -> Result<Option<InventoryItem>, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE inventory_items
            SET quantity = $3, unit = $4
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(quantity)
        .bind(unit)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_for_user(id, user_id).await
    }

    /// Delete one of the user's inventory items. Returns `false` when the
    /// item does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        id: InventoryItemId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM inventory_items
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
