//! Registration and login handlers.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_core::UserId;

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Request body for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

/// Create a new account.
///
/// # Errors
///
/// 400 for an invalid email or weak password, 409 when the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            email: user.email.into_inner(),
            created_at: user.created_at,
        }),
    ))
}

/// Exchange credentials for a bearer token.
///
/// # Errors
///
/// 401 when the email/password pair is wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    let (user, issued) = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;

    tracing::debug!(user_id = %user.id, "Token issued");

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer".to_owned(),
        expires_at: issued.expires_at,
    }))
}
