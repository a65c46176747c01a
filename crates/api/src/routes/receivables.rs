//! Receivable routes: listing and settlement.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::entities::sea_orm_active_enums::{PaymentMethod, ReceivableStatus};
use hydra_db::{BatchSettleInput, ReceivableFilter, ReceivableRepository, SettleInput};

/// Creates the receivable routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/receivables", get(list_receivables))
        .route("/receivables/{receivable_id}", get(get_receivable))
        .route("/receivables/{receivable_id}/settle", post(settle))
        .route("/receivables/settle-batch", post(settle_batch))
}

/// Query parameters for listing receivables.
#[derive(Debug, Deserialize)]
pub struct ListReceivablesQuery {
    /// Filter by status.
    pub status: Option<ReceivableStatus>,
    /// Filter by collaborator.
    pub collaborator_id: Option<Uuid>,
    /// Filter by sale date range start.
    pub from: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Filter by sale date range end.
    pub to: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Request body for settling a receivable.
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    /// How the debt was paid.
    pub method: PaymentMethod,
    /// User recording the settlement.
    pub settled_by: Uuid,
}

/// Request body for batch settlement.
#[derive(Debug, Deserialize)]
pub struct BatchSettleRequest {
    /// Receivables to settle.
    pub receivable_ids: Vec<Uuid>,
    /// How the debts were paid.
    pub method: PaymentMethod,
    /// User recording the settlement.
    pub settled_by: Uuid,
}

/// Response for batch settlement.
#[derive(Debug, Serialize)]
pub struct BatchSettleResponse {
    /// Number of receivables actually settled.
    pub settled: u64,
}

/// GET `/receivables` - List receivables with filters.
async fn list_receivables(
    State(state): State<AppState>,
    Query(query): Query<ListReceivablesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ReceivableRepository::new(state.conn());
    let receivables = repo
        .list(ReceivableFilter {
            status: query.status,
            collaborator_id: query.collaborator_id,
            date_from: query.from,
            date_to: query.to,
        })
        .await?;

    Ok(Json(receivables))
}

/// GET `/receivables/{receivable_id}` - Get a receivable.
async fn get_receivable(
    State(state): State<AppState>,
    Path(receivable_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ReceivableRepository::new(state.conn());
    let receivable = repo.find_by_id(receivable_id).await?;

    Ok(Json(receivable))
}

/// POST `/receivables/{receivable_id}/settle` - Settle one outstanding
/// receivable.
async fn settle(
    State(state): State<AppState>,
    Path(receivable_id): Path<Uuid>,
    Json(payload): Json<SettleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ReceivableRepository::new(state.conn());
    let receivable = repo
        .settle(SettleInput {
            receivable_id,
            method: payload.method,
            settled_by: payload.settled_by,
        })
        .await?;

    Ok(Json(json!({ "receivable": receivable })))
}

/// POST `/receivables/settle-batch` - Settle a batch of receivables and
/// report how many were actually modified.
async fn settle_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchSettleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ReceivableRepository::new(state.conn());
    let settled = repo
        .batch_settle(BatchSettleInput {
            receivable_ids: payload.receivable_ids,
            method: payload.method,
            settled_by: payload.settled_by,
        })
        .await?;

    Ok(Json(BatchSettleResponse { settled }))
}
