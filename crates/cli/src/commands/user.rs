//! User account management commands.

use thiserror::Error;

use larder_server::db;
use larder_server::services::auth::{AuthError, AuthService};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Registration failure (invalid email, weak password, duplicate).
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new user account.
///
/// # Errors
///
/// Returns `UserCommandError` if the database URL is missing, the
/// connection fails, or registration is rejected.
pub async fn create(email: &str, password: &str) -> Result<(), UserCommandError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(UserCommandError::MissingEnvVar("LARDER_DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;

    let user = AuthService::new(&pool).register(email, password).await?;
    tracing::info!("Created user {} ({})", user.email, user.id);

    Ok(())
}
