//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use hydra_db::entities::sea_orm_active_enums::{ProductCategory, ProductStatus};
use hydra_db::{CreateProductInput, ProductFilter, ProductRepository, UpdateProductInput};

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{product_id}", get(get_product))
        .route("/products/{product_id}", patch(update_product))
        .route("/products/{product_id}", delete(deactivate_product))
}

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Filter by category.
    pub category: Option<ProductCategory>,
    /// Filter by status.
    pub status: Option<ProductStatus>,
    /// Name substring filter.
    pub name: Option<String>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: ProductCategory,
    /// Optional scan code.
    pub barcode: Option<String>,
    /// Unit sale price.
    pub price: Decimal,
    /// Optional low-stock alert threshold.
    pub min_stock: Option<Decimal>,
}

/// Request body for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New display name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<ProductCategory>,
    /// New scan code.
    pub barcode: Option<Option<String>>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New low-stock threshold.
    pub min_stock: Option<Option<Decimal>>,
    /// New status.
    pub status: Option<ProductStatus>,
}

/// GET `/products` - List products with filters.
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.conn());
    let products = repo
        .list(ProductFilter {
            category: query.category,
            status: query.status,
            name_contains: query.name,
        })
        .await?;

    Ok(Json(products))
}

/// POST `/products` - Create a product.
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.conn());
    let product = repo
        .create(CreateProductInput {
            name: payload.name,
            category: payload.category,
            barcode: payload.barcode,
            price: payload.price,
            min_stock: payload.min_stock,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET `/products/{product_id}` - Get a product.
async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.conn());
    let product = repo.find_by_id(product_id).await?;

    Ok(Json(product))
}

/// PATCH `/products/{product_id}` - Update a product.
async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.conn());
    let product = repo
        .update(
            product_id,
            UpdateProductInput {
                name: payload.name,
                category: payload.category,
                barcode: payload.barcode,
                price: payload.price,
                min_stock: payload.min_stock,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(product))
}

/// DELETE `/products/{product_id}` - Deactivate a product (soft delete).
async fn deactivate_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new(state.conn());
    let product = repo.deactivate(product_id).await?;

    Ok(Json(product))
}
