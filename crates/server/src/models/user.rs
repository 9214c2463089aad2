//! User domain types.

use chrono::{DateTime, Utc};

use larder_core::{Email, UserId};

/// An account holder. All recipes and inventory are scoped to a user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
