//! Recipe repository.
//!
//! Recipes and their ingredient lines live in two tables; reads assemble
//! them in two queries (one for the recipes, one `= ANY($1)` fetch for all
//! their lines) instead of a row-multiplying join. Writes that touch lines
//! run in a transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use larder_core::{IngredientId, RecipeId, RecipeIngredientId, UserId};

use super::RepositoryError;
use crate::models::{NewRecipe, NewRecipeIngredient, Recipe, RecipeIngredient};

/// Repository for recipe database operations.
pub struct RecipeRepository<'a> {
    pool: &'a PgPool,
}

/// Internal row type for recipe queries.
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: RecipeId,
    title: String,
    servings: i32,
    instructions: Option<String>,
    is_selected: bool,
}

/// Internal row type for ingredient-line queries, joined with the catalog
/// for the display name and aisle of bound lines.
#[derive(Debug, sqlx::FromRow)]
struct RecipeIngredientRow {
    id: RecipeIngredientId,
    recipe_id: RecipeId,
    ingredient_id: Option<IngredientId>,
    name: String,
    quantity: String,
    unit: Option<String>,
    catalog_name: Option<String>,
    aisle: Option<String>,
}

impl From<RecipeIngredientRow> for RecipeIngredient {
    fn from(row: RecipeIngredientRow) -> Self {
        Self {
            id: row.id,
            ingredient_id: row.ingredient_id,
            // Bound lines display the catalog spelling of the name
            name: row.catalog_name.unwrap_or(row.name),
            quantity: row.quantity,
            unit: row.unit,
            aisle: row.aisle,
        }
    }
}

impl<'a> RecipeRepository<'a> {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all of a user's recipes with their ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Recipe>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, servings, instructions, is_selected
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// List the user's selected recipes (the current cooking plan).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_selected_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Recipe>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, servings, instructions, is_selected
            FROM recipes
            WHERE user_id = $1 AND is_selected
            ORDER BY created_at
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Get one of the user's recipes by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        id: RecipeId,
        user_id: UserId,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, servings, instructions, is_selected
            FROM recipes
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.assemble(vec![row]).await?.pop())
    }

    /// Create a recipe with its ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if an insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        recipe: &NewRecipe,
    ) -> Result<Recipe, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, RecipeId>(
            r"
            INSERT INTO recipes (user_id, title, servings, instructions)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(&recipe.title)
        .bind(recipe.servings)
        .bind(&recipe.instructions)
        .fetch_one(&mut *tx)
        .await?;

        insert_lines(&mut tx, id, &recipe.ingredients).await?;
        tx.commit().await?;

        self.get_for_user(id, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Replace a recipe: update its fields and swap the whole ingredient
    /// list. Returns `None` when the recipe does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn replace(
        &self,
        id: RecipeId,
        user_id: UserId,
        recipe: &NewRecipe,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r"
            UPDATE recipes
            SET title = $3, servings = $4, instructions = $5, updated_at = now()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(&recipe.title)
        .bind(recipe.servings)
        .bind(&recipe.instructions)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query(r"DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_lines(&mut tx, id, &recipe.ingredients).await?;
        tx.commit().await?;

        self.get_for_user(id, user_id).await
    }

    /// Set the selection flag on one of the user's recipes.
    /// Returns `None` when the recipe does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn set_selected(
        &self,
        id: RecipeId,
        user_id: UserId,
        is_selected: bool,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE recipes
            SET is_selected = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(is_selected)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_for_user(id, user_id).await
    }

    /// Deselect all of the user's recipes. Returns how many were deselected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn clear_selection(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE recipes
            SET is_selected = FALSE, updated_at = now()
            WHERE user_id = $1 AND is_selected
            ",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Attach ingredient lines to a batch of recipe rows.
    async fn assemble(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id.as_uuid()).collect();
        let line_rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r"
            SELECT ri.id, ri.recipe_id, ri.ingredient_id, ri.name, ri.quantity, ri.unit,
                   i.name AS catalog_name, i.aisle
            FROM recipe_ingredients ri
            LEFT JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.position, ri.id
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut lines: HashMap<RecipeId, Vec<RecipeIngredient>> = HashMap::new();
        for row in line_rows {
            let recipe_id = row.recipe_id;
            lines.entry(recipe_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| Recipe {
                id: row.id,
                title: row.title,
                servings: row.servings,
                instructions: row.instructions,
                is_selected: row.is_selected,
                ingredients: lines.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }
}

/// Insert ingredient lines for a recipe inside an open transaction,
/// preserving their order via the `position` column.
async fn insert_lines(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    recipe_id: RecipeId,
    lines: &[NewRecipeIngredient],
) -> Result<(), RepositoryError> {
    for (position, line) in lines.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| RepositoryError::Conflict("too many ingredient lines".to_owned()))?;

        sqlx::query(
            r"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, name, quantity, unit, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(recipe_id)
        .bind(line.ingredient_id)
        .bind(&line.name)
        .bind(&line.quantity)
        .bind(&line.unit)
        .bind(position)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
