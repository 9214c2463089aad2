//! Seed the shared ingredient catalog.
//!
//! Inserts a starter set of common ingredients with their store aisle and a
//! suggested unit. Idempotent: entries whose name already exists (compared
//! case-insensitively) are left untouched, so the command is safe to rerun
//! after adding custom catalog rows.

use thiserror::Error;

use larder_server::db::{self, IngredientRepository, RepositoryError};

/// Starter catalog: (name, aisle, default unit).
const COMMON_INGREDIENTS: &[(&str, &str, &str)] = &[
    // Produce
    ("Onion", "Produce", "whole"),
    ("Garlic", "Produce", "clove"),
    ("Tomato", "Produce", "whole"),
    ("Potato", "Produce", "kg"),
    ("Carrot", "Produce", "whole"),
    ("Spinach", "Produce", "bunch"),
    // Meat
    ("Chicken Breast", "Meat", "kg"),
    ("Ground Beef", "Meat", "kg"),
    ("Bacon", "Meat", "pack"),
    // Dairy
    ("Milk", "Dairy", "L"),
    ("Butter", "Dairy", "block"),
    ("Cheddar Cheese", "Dairy", "block"),
    ("Eggs", "Dairy", "dozen"),
    // Pantry
    ("Olive Oil", "Oil & Vinegars", "L"),
    ("Salt", "Spices", "g"),
    ("Black Pepper", "Spices", "g"),
    ("Rice", "Grains", "kg"),
    ("Pasta", "Grains", "box"),
    ("Flour", "Baking", "kg"),
    ("Sugar", "Baking", "kg"),
];

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed the ingredient catalog.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails.
pub async fn ingredients() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(SeedError::MissingEnvVar("LARDER_DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;
    let repository = IngredientRepository::new(&pool);

    tracing::info!("Starting ingredient seed...");
    let mut added = 0_u32;
    for &(name, aisle, default_unit) in COMMON_INGREDIENTS {
        if repository
            .insert_if_absent(name, Some(aisle), Some(default_unit))
            .await?
        {
            added += 1;
        }
    }

    tracing::info!("Successfully added {added} new ingredients");
    Ok(())
}
