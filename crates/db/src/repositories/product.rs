//! Product repository: catalog CRUD.
//!
//! Products are never hard-deleted once referenced by sales; removal is
//! a status flip to `inactive` so historical sale items keep a valid
//! foreign key.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{
    products,
    sea_orm_active_enums::{ProductCategory, ProductStatus},
};

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
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

/// Input for updating a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New display name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<ProductCategory>,
    /// New scan code. `Some(None)` clears it.
    pub barcode: Option<Option<String>>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New low-stock threshold. `Some(None)` clears it.
    pub min_stock: Option<Option<Decimal>>,
    /// New status.
    pub status: Option<ProductStatus>,
}

/// Filter options for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Filter by category.
    pub category: Option<ProductCategory>,
    /// Filter by status.
    pub status: Option<ProductStatus>,
    /// Case-insensitive name substring.
    pub name_contains: Option<String>,
}

/// Product repository for catalog access.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product in `active` status.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or negative price, or
    /// a database error.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        if input.name.trim().is_empty() {
            return Err(ProductError::Validation("name is required".to_string()));
        }
        if input.price < Decimal::ZERO {
            return Err(ProductError::Validation(
                "price cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            category: Set(input.category),
            barcode: Set(input.barcode),
            price: Set(input.price),
            min_stock: Set(input.min_stock),
            status: Set(ProductStatus::Active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let product = product.insert(&self.db).await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");

        Ok(product)
    }

    /// Gets a product by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<products::Model, ProductError> {
        products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Updates a product, applying only the provided fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, a validation error for a negative
    /// price, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, ProductError> {
        if let Some(price) = input.price {
            if price < Decimal::ZERO {
                return Err(ProductError::Validation(
                    "price cannot be negative".to_string(),
                ));
            }
        }

        let product = self.find_by_id(id).await?;
        let mut active: products::ActiveModel = product.into();

        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(ProductError::Validation("name cannot be blank".to_string()));
            }
            active.name = Set(name);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(barcode) = input.barcode {
            active.barcode = Set(barcode);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(min_stock) = input.min_stock {
            active.min_stock = Set(min_stock);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deactivates a product, hiding it from sale without touching sale
    /// history or its stock ledger rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn deactivate(&self, id: Uuid) -> Result<products::Model, ProductError> {
        let product = self.find_by_id(id).await?;
        let mut active: products::ActiveModel = product.into();
        active.status = Set(ProductStatus::Inactive);
        active.updated_at = Set(Utc::now().into());
        let product = active.update(&self.db).await?;

        tracing::info!(product_id = %product.id, "Product deactivated");

        Ok(product)
    }

    /// Lists products with optional filters, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<products::Model>, ProductError> {
        let mut query = products::Entity::find();

        if let Some(category) = filter.category {
            query = query.filter(products::Column::Category.eq(category));
        }
        if let Some(status) = filter.status {
            query = query.filter(products::Column::Status.eq(status));
        }
        if let Some(name) = filter.name_contains {
            query = query.filter(products::Column::Name.contains(&name));
        }

        let products = query
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?;

        Ok(products)
    }
}
