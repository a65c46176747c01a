//! Sale routes: creation, listing, cancellation, and edit.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_core::cart::CartItem;
use hydra_db::entities::sea_orm_active_enums::{CustomerType, PaymentMethod, SaleStatus};
use hydra_db::entities::{receivables, sale_items, sales};
use hydra_db::{
    CancelSaleInput, CreateSaleInput, EditSaleInput, SaleFilter, SaleRepository, SaleWithItems,
};

/// Creates the sale routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales", post(create_sale))
        .route("/sales/{sale_id}", get(get_sale))
        .route("/sales/{sale_id}/cancel", post(cancel_sale))
        .route("/sales/{sale_id}/edit", post(edit_sale))
}

/// A cart line as sent by the client.
#[derive(Debug, Deserialize)]
pub struct CartLineRequest {
    /// Product ID.
    pub product_id: Uuid,
    /// Quantity (positive).
    pub quantity: i32,
    /// Unit price at sale time.
    pub unit_price: Decimal,
    /// Line subtotal; must equal quantity times unit price.
    pub subtotal: Decimal,
}

impl From<CartLineRequest> for CartItem {
    fn from(line: CartLineRequest) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
        }
    }
}

/// Request body for creating a sale.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    /// Sales point.
    pub location: String,
    /// Customer type.
    pub customer_type: CustomerType,
    /// Collaborator buying on account, if any.
    pub collaborator_id: Option<Uuid>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Cart lines.
    pub items: Vec<CartLineRequest>,
    /// User ringing up the sale.
    pub created_by: Uuid,
}

/// Request body for cancelling a sale.
#[derive(Debug, Deserialize)]
pub struct CancelSaleRequest {
    /// Mandatory cancellation reason.
    pub reason: String,
    /// User performing the cancellation.
    pub cancelled_by: Uuid,
}

/// Request body for editing a sale.
#[derive(Debug, Deserialize)]
pub struct EditSaleRequest {
    /// Replacement cart lines.
    pub items: Vec<CartLineRequest>,
    /// Replacement payment method.
    pub payment_method: PaymentMethod,
    /// Replacement customer type.
    pub customer_type: CustomerType,
    /// Replacement collaborator, if any.
    pub collaborator_id: Option<Uuid>,
    /// User performing the edit.
    pub edited_by: Uuid,
    /// Apply the stock-sufficiency check to the replacement items.
    #[serde(default)]
    pub enforce_stock: bool,
}

/// Query parameters for listing sales.
#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    /// Filter by status.
    pub status: Option<SaleStatus>,
    /// Filter by customer type.
    pub customer_type: Option<CustomerType>,
    /// Filter by payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Filter by location.
    pub location: Option<String>,
    /// Filter by collaborator.
    pub collaborator_id: Option<Uuid>,
    /// Filter by sale date range start.
    pub from: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Filter by sale date range end.
    pub to: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Response for a sale with its lines and optional receivable.
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    /// Sale header.
    pub sale: sales::Model,
    /// Line items.
    pub items: Vec<sale_items::Model>,
    /// Receivable opened for this sale, if any.
    pub receivable: Option<receivables::Model>,
}

impl From<SaleWithItems> for SaleResponse {
    fn from(s: SaleWithItems) -> Self {
        Self {
            sale: s.sale,
            items: s.items,
            receivable: s.receivable,
        }
    }
}

/// Response for an edit: the superseded original and its replacement.
#[derive(Debug, Serialize)]
pub struct EditSaleResponse {
    /// The original sale, now with status `edited`.
    pub original: sales::Model,
    /// The replacement sale.
    pub replacement: SaleResponse,
}

/// POST `/sales` - Create a sale.
async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SaleRepository::new(state.conn());
    let sale = repo
        .create_sale(CreateSaleInput {
            location: payload.location,
            customer_type: payload.customer_type,
            collaborator_id: payload.collaborator_id,
            payment_method: payload.payment_method,
            items: payload.items.into_iter().map(Into::into).collect(),
            created_by: payload.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SaleResponse::from(sale))))
}

/// GET `/sales` - List sales with filters.
async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SaleRepository::new(state.conn());
    let sales = repo
        .list_sales(SaleFilter {
            status: query.status,
            customer_type: query.customer_type,
            payment_method: query.payment_method,
            location: query.location,
            collaborator_id: query.collaborator_id,
            date_from: query.from,
            date_to: query.to,
        })
        .await?;

    Ok(Json(sales))
}

/// GET `/sales/{sale_id}` - Get a sale with lines and receivable.
async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SaleRepository::new(state.conn());
    let sale = repo.get_sale(sale_id).await?;

    Ok(Json(SaleResponse::from(sale)))
}

/// POST `/sales/{sale_id}/cancel` - Cancel a finalized sale.
async fn cancel_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(payload): Json<CancelSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SaleRepository::new(state.conn());
    let sale = repo
        .cancel_sale(CancelSaleInput {
            sale_id,
            reason: payload.reason,
            cancelled_by: payload.cancelled_by,
        })
        .await?;

    Ok(Json(sale))
}

/// POST `/sales/{sale_id}/edit` - Supersede a finalized sale with a
/// replacement carrying the same sale number.
async fn edit_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(payload): Json<EditSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SaleRepository::new(state.conn());
    let outcome = repo
        .edit_sale(EditSaleInput {
            sale_id,
            items: payload.items.into_iter().map(Into::into).collect(),
            payment_method: payload.payment_method,
            customer_type: payload.customer_type,
            collaborator_id: payload.collaborator_id,
            edited_by: payload.edited_by,
            enforce_stock: payload.enforce_stock,
        })
        .await?;

    Ok(Json(EditSaleResponse {
        original: outcome.original,
        replacement: SaleResponse::from(outcome.replacement),
    }))
}
