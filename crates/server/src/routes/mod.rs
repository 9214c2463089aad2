//! HTTP route handlers for the Larder API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (verifies database)
//!
//! # Auth
//! POST /auth/register             - Create an account
//! POST /auth/login                - Mint a bearer token (24 h, no refresh)
//!
//! # Recipes (requires auth)
//! GET  /recipes                   - List recipes with ingredient lines
//! POST /recipes                   - Create a recipe
//! GET  /recipes/suggestions       - Score all recipes against inventory
//! POST /recipes/clear-selection   - Deselect every recipe
//! GET  /recipes/{id}              - Recipe detail (includes instructions)
//! PUT  /recipes/{id}              - Full update, replaces the ingredient list
//! PATCH /recipes/{id}/select      - Toggle the cooking-plan flag
//!
//! # Inventory (requires auth)
//! GET  /inventory                 - List on-hand items
//! POST /inventory                 - Upsert per (user, ingredient)
//! PUT  /inventory/{id}            - Update quantity/unit
//! DELETE /inventory/{id}          - Remove an item
//!
//! # Catalog & grocery (requires auth)
//! GET  /ingredients               - Shared catalog, ordered by name
//! GET  /grocery                   - Shopping list, grouped by aisle
//! ```
//!
//! Request/response DTOs live beside their handlers. Every error renders as
//! `{"detail": "..."}` via [`crate::error::AppError`].

pub mod auth;
pub mod grocery;
pub mod ingredients;
pub mod inventory;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/recipes", recipes::router())
        .nest("/inventory", inventory::router())
        .nest("/ingredients", ingredients::router())
        .nest("/grocery", grocery::router())
}
