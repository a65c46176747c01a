//! User administration routes.
//!
//! User models serialize without the password hash; no response shaping
//! is needed here.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::{CreateUserInput, UserRepository};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/active", patch(set_active))
        .route("/users/{user_id}/password", patch(change_password))
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Unique login name.
    pub username: String,
    /// Name shown on receipts and audit trails.
    pub display_name: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Role label.
    pub role: String,
}

/// Request body for flipping the active flag.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// New active state.
    pub active: bool,
}

/// GET `/users` - List users.
async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.conn());
    let users = repo.list().await?;

    Ok(Json(users))
}

/// POST `/users` - Create a user.
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.conn());
    let user = repo
        .create(CreateUserInput {
            username: payload.username,
            display_name: payload.display_name,
            password: payload.password,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET `/users/{user_id}` - Get a user.
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.conn());
    let user = repo.find_by_id(user_id).await?;

    Ok(Json(user))
}

/// Request body for a password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// New plaintext password, hashed before storage.
    pub password: String,
}

/// PATCH `/users/{user_id}/password` - Replace the stored password hash.
async fn change_password(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.conn());
    let user = repo.change_password(user_id, &payload.password).await?;

    Ok(Json(user))
}

/// PATCH `/users/{user_id}/active` - Flip the active flag.
async fn set_active(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.conn());
    let user = repo.set_active(user_id, payload.active).await?;

    Ok(Json(user))
}
