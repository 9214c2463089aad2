//! Database operations for the Larder `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Account records (argon2 password hashes)
//! - `api_tokens` - Opaque bearer tokens with a fixed one-day expiry
//! - `ingredients` - Shared catalog: name, store aisle, default unit
//! - `recipes` / `recipe_ingredients` - Per-user recipes and their lines
//! - `inventory_items` - Per-user on-hand quantities, one row per
//!   (user, ingredient)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p larder-cli -- migrate
//! ```
//!
//! Queries use the runtime sqlx API with `FromRow` row types converted into
//! domain models, so the workspace builds without a live database.

pub mod ingredients;
pub mod inventory;
pub mod recipes;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use ingredients::IngredientRepository;
pub use inventory::InventoryRepository;
pub use recipes::RecipeRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
