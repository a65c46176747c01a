//! Settings routes: JSON values under well-known keys.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use crate::{AppState, error::ApiError};
use hydra_db::SettingsRepository;
use hydra_shared::AppError;

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/{key}", get(get_setting))
        .route("/settings/{key}", put(put_setting))
}

/// GET `/settings` - List every setting.
async fn list_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingsRepository::new(state.conn());
    let settings = repo.list().await?;

    Ok(Json(settings))
}

/// GET `/settings/{key}` - Get one setting.
async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingsRepository::new(state.conn());
    let value = repo
        .get(&key)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("setting {key}"))))?;

    Ok(Json(json!({ "key": key, "value": value })))
}

/// PUT `/settings/{key}` - Insert or replace one setting.
async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingsRepository::new(state.conn());
    repo.set(&key, value.clone()).await?;

    Ok(Json(json!({ "key": key, "value": value })))
}
