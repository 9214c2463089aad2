//! Ingredient catalog repository.
//!
//! The catalog is shared across users. Lookups by name are case-insensitive
//! (backed by the expression index on `lower(name)`), which is what lets a
//! free-text recipe ingredient bind to an existing entry regardless of how
//! the user typed it.

use sqlx::PgPool;

use larder_core::IngredientId;

use super::RepositoryError;
use crate::models::Ingredient;

/// Repository for ingredient catalog operations.
pub struct IngredientRepository<'a> {
    pool: &'a PgPool,
}

/// Internal row type for ingredient queries.
#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: IngredientId,
    name: String,
    aisle: Option<String>,
    default_unit: Option<String>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            aisle: row.aisle,
            default_unit: row.default_unit,
        }
    }
}

impl<'a> IngredientRepository<'a> {
    /// Create a new ingredient repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Ingredient>, RepositoryError> {
        let rows = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT id, name, aisle, default_unit
            FROM ingredients
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    /// Get a catalog entry by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, RepositoryError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT id, name, aisle, default_unit
            FROM ingredients
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Ingredient::from))
    }

    /// Find a catalog entry by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, RepositoryError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT id, name, aisle, default_unit
            FROM ingredients
            WHERE lower(name) = lower($1)
            ",
        )
        .bind(name.trim())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Ingredient::from))
    }

    /// Insert a catalog entry unless one with the same name already exists.
    ///
    /// Returns `true` when a new entry was inserted. Used by the seed
    /// command; idempotent across runs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_if_absent(
        &self,
        name: &str,
        aisle: Option<&str>,
        default_unit: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO ingredients (name, aisle, default_unit)
            VALUES ($1, $2, $3)
            ON CONFLICT (lower(name)) DO NOTHING
            ",
        )
        .bind(name)
        .bind(aisle)
        .bind(default_unit)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
