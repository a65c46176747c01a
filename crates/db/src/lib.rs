//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The stock ledger primitives (shared transactional increment/decrement)
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod stock;

pub use repositories::{
    BatchSettleInput, CancelSaleInput, CollaboratorError, CollaboratorRepository,
    CreateCollaboratorInput, CreateProductInput, CreateSaleInput, CreateUserInput, EditOutcome,
    EditSaleInput, InventoryError, InventoryRepository, ProductError, ProductFilter,
    ProductRepository, ReceivableError, ReceivableFilter, ReceivableRepository, RecordEntryInput,
    SaleError, SaleFilter, SaleRepository, SaleWithItems, SettingsRepository, SettleInput,
    UpdateProductInput, UserError, UserRepository,
};

use hydra_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    Database::connect(options).await
}
