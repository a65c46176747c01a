//! Inventory and stock routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::entities::sea_orm_active_enums::EntryKind;
use hydra_db::{InventoryRepository, RecordEntryInput, stock};

/// Creates the inventory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory/entries", post(record_entry))
        .route("/inventory/entries", get(list_entries))
        .route("/inventory/stock", get(list_stock))
}

/// Request body for recording an inventory entry.
#[derive(Debug, Deserialize)]
pub struct RecordEntryRequest {
    /// Product whose stock is moving.
    pub product_id: Uuid,
    /// Location of the ledger row.
    pub location: String,
    /// Entry quantity (delta or replacement balance, per `kind`).
    pub quantity: Decimal,
    /// Whether the quantity is a delta or a replacement balance.
    pub kind: EntryKind,
    /// User recording the entry.
    pub recorded_by: Uuid,
    /// Optional free-form note.
    pub note: Option<String>,
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Product to list entries for.
    pub product_id: Uuid,
}

/// Query parameters for listing stock balances.
#[derive(Debug, Deserialize)]
pub struct ListStockQuery {
    /// Location to list balances for.
    pub location: String,
}

/// POST `/inventory/entries` - Record a stock movement.
async fn record_entry(
    State(state): State<AppState>,
    Json(payload): Json<RecordEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InventoryRepository::new(state.conn());
    let entry = repo
        .record_entry(RecordEntryInput {
            product_id: payload.product_id,
            location: payload.location,
            quantity: payload.quantity,
            kind: payload.kind,
            recorded_by: payload.recorded_by,
            note: payload.note,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET `/inventory/entries?product_id=` - List entries for a product.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InventoryRepository::new(state.conn());
    let entries = repo.list_for_product(query.product_id).await?;

    Ok(Json(entries))
}

/// GET `/inventory/stock?location=` - List stock balances at a location.
async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<ListStockQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = stock::list_for_location(&*state.db, &query.location).await?;

    Ok(Json(entries))
}
