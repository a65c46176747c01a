//! Collaborator routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::{CollaboratorRepository, CreateCollaboratorInput};

/// Creates the collaborator routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/collaborators", get(list_collaborators))
        .route("/collaborators", post(create_collaborator))
        .route("/collaborators/{collaborator_id}", get(get_collaborator))
        .route("/collaborators/{collaborator_id}/active", patch(set_active))
}

/// Query parameters for listing collaborators.
#[derive(Debug, Deserialize)]
pub struct ListCollaboratorsQuery {
    /// Only list active collaborators.
    #[serde(default)]
    pub active_only: bool,
}

/// Request body for creating a collaborator.
#[derive(Debug, Deserialize)]
pub struct CreateCollaboratorRequest {
    /// Display name.
    pub name: String,
    /// Optional badge or payroll code.
    pub code: Option<String>,
}

/// Request body for flipping the active flag.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// New active state.
    pub active: bool,
}

/// GET `/collaborators` - List collaborators.
async fn list_collaborators(
    State(state): State<AppState>,
    Query(query): Query<ListCollaboratorsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CollaboratorRepository::new(state.conn());
    let collaborators = repo.list(query.active_only).await?;

    Ok(Json(collaborators))
}

/// POST `/collaborators` - Register a collaborator.
async fn create_collaborator(
    State(state): State<AppState>,
    Json(payload): Json<CreateCollaboratorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CollaboratorRepository::new(state.conn());
    let collaborator = repo
        .create(CreateCollaboratorInput {
            name: payload.name,
            code: payload.code,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// GET `/collaborators/{collaborator_id}` - Get a collaborator.
async fn get_collaborator(
    State(state): State<AppState>,
    Path(collaborator_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CollaboratorRepository::new(state.conn());
    let collaborator = repo.find_by_id(collaborator_id).await?;

    Ok(Json(collaborator))
}

/// PATCH `/collaborators/{collaborator_id}/active` - Flip the active flag.
async fn set_active(
    State(state): State<AppState>,
    Path(collaborator_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CollaboratorRepository::new(state.conn());
    let collaborator = repo.set_active(collaborator_id, payload.active).await?;

    Ok(Json(collaborator))
}
