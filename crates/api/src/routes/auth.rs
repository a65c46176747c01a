//! Login endpoint.
//!
//! No token machinery: the desktop clients keep a local session and only
//! need the password check and the user record.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::UserRepository;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Role label.
    pub role: String,
}

/// POST `/auth/login` - Verify credentials and return the user record.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = UserRepository::new(state.conn());
    let user = repo.authenticate(&payload.username, &payload.password).await?;

    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role,
    }))
}

/// Creates the auth routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
