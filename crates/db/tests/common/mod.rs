//! Shared setup for the integration test suite.
//!
//! Each test gets its own in-memory SQLite database with the full schema
//! applied. The pool is capped at one connection so every statement sees
//! the same in-memory database.

// Not every test binary uses every helper.
#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use hydra_db::entities::sea_orm_active_enums::{EntryKind, ProductCategory};
use hydra_db::migration::Migrator;
use hydra_db::{
    CollaboratorRepository, CreateCollaboratorInput, CreateProductInput, CreateUserInput,
    InventoryRepository, ProductRepository, RecordEntryInput, UserRepository,
};

/// Location used by most tests.
pub const LOCATION: &str = "counter";

/// Connects to a fresh in-memory database and applies the schema.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates a cashier user and returns its id.
pub async fn seed_user(db: &DatabaseConnection) -> Uuid {
    let repo = UserRepository::new(db.clone());
    let user = repo
        .create(CreateUserInput {
            username: format!("cashier-{}", Uuid::new_v4()),
            display_name: "Test Cashier".to_string(),
            password: "s3cret-pass".to_string(),
            role: "cashier".to_string(),
        })
        .await
        .expect("Failed to seed user");
    user.id
}

/// Creates an active collaborator and returns its id.
pub async fn seed_collaborator(db: &DatabaseConnection) -> Uuid {
    let repo = CollaboratorRepository::new(db.clone());
    let collaborator = repo
        .create(CreateCollaboratorInput {
            name: "Test Collaborator".to_string(),
            code: Some("C100".to_string()),
        })
        .await
        .expect("Failed to seed collaborator");
    collaborator.id
}

/// Creates a product with the given opening stock at [`LOCATION`] and
/// returns its id.
pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    opening_stock: Decimal,
    recorded_by: Uuid,
) -> Uuid {
    let repo = ProductRepository::new(db.clone());
    let product = repo
        .create(CreateProductInput {
            name: name.to_string(),
            category: ProductCategory::Beverage,
            barcode: None,
            price,
            min_stock: None,
        })
        .await
        .expect("Failed to seed product");

    if opening_stock > Decimal::ZERO {
        let inventory = InventoryRepository::new(db.clone());
        inventory
            .record_entry(RecordEntryInput {
                product_id: product.id,
                location: LOCATION.to_string(),
                quantity: opening_stock,
                kind: EntryKind::Additive,
                recorded_by,
                note: None,
            })
            .await
            .expect("Failed to seed opening stock");
    }

    product.id
}
