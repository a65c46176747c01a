//! Database seeder for Hydra development and testing.
//!
//! Seeds an admin user, a couple of collaborators, a small product
//! catalog with opening stock at the counter location, and the default
//! fiscal settings.
//!
//! Usage: cargo run --bin seeder

use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use hydra_db::entities::sea_orm_active_enums::{EntryKind, ProductCategory};
use hydra_db::entities::{products, users};
use hydra_db::{
    CollaboratorRepository, CreateCollaboratorInput, CreateProductInput, CreateUserInput,
    InventoryRepository, ProductRepository, RecordEntryInput, SettingsRepository, UserRepository,
};

/// Counter location seeded with opening stock.
const DEFAULT_LOCATION: &str = "counter";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = hydra_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    let admin_id = seed_admin_user(&db).await;

    println!("Seeding collaborators...");
    seed_collaborators(&db).await;

    println!("Seeding products and opening stock...");
    seed_products(&db, admin_id).await;

    println!("Seeding settings...");
    seed_settings(&db).await;

    println!("Seeding complete!");
}

/// Seeds the admin user, returning its id for audit fields.
async fn seed_admin_user(db: &DatabaseConnection) -> Uuid {
    if let Ok(Some(existing)) = users::Entity::find()
        .filter(users::Column::Username.eq("admin"))
        .one(db)
        .await
    {
        println!("  Admin user already exists, skipping...");
        return existing.id;
    }

    let repo = UserRepository::new(db.clone());
    let admin = repo
        .create(CreateUserInput {
            username: "admin".to_string(),
            display_name: "Administrator".to_string(),
            password: "change-me-now".to_string(),
            role: "admin".to_string(),
        })
        .await
        .expect("Failed to seed admin user");

    println!("  Created admin user: admin / change-me-now");
    admin.id
}

/// Seeds a pair of collaborators for on-account sales.
async fn seed_collaborators(db: &DatabaseConnection) {
    let repo = CollaboratorRepository::new(db.clone());

    if !repo
        .list(false)
        .await
        .expect("Failed to list collaborators")
        .is_empty()
    {
        println!("  Collaborators already exist, skipping...");
        return;
    }

    for (name, code) in [("Ana Souza", "C001"), ("Bruno Lima", "C002")] {
        repo.create(CreateCollaboratorInput {
            name: name.to_string(),
            code: Some(code.to_string()),
        })
        .await
        .expect("Failed to seed collaborator");
        println!("  Created collaborator: {name}");
    }
}

/// Seeds a small catalog with opening stock at the counter.
async fn seed_products(db: &DatabaseConnection, admin_id: Uuid) {
    if products::Entity::find()
        .one(db)
        .await
        .expect("Failed to query products")
        .is_some()
    {
        println!("  Products already exist, skipping...");
        return;
    }

    let product_repo = ProductRepository::new(db.clone());
    let inventory_repo = InventoryRepository::new(db.clone());

    let catalog = [
        ("Espresso", ProductCategory::Beverage, dec!(6.00), dec!(200)),
        ("Latte", ProductCategory::Beverage, dec!(9.50), dec!(150)),
        (
            "Orange Juice",
            ProductCategory::Beverage,
            dec!(8.00),
            dec!(60),
        ),
        (
            "Cheese Sandwich",
            ProductCategory::Food,
            dec!(12.00),
            dec!(40),
        ),
        ("Carrot Cake", ProductCategory::Food, dec!(10.50), dec!(25)),
    ];

    for (name, category, price, opening_stock) in catalog {
        let product = product_repo
            .create(CreateProductInput {
                name: name.to_string(),
                category,
                barcode: None,
                price,
                min_stock: Some(dec!(10)),
            })
            .await
            .expect("Failed to seed product");

        inventory_repo
            .record_entry(RecordEntryInput {
                product_id: product.id,
                location: DEFAULT_LOCATION.to_string(),
                quantity: opening_stock,
                kind: EntryKind::Additive,
                recorded_by: admin_id,
                note: Some("opening stock".to_string()),
            })
            .await
            .expect("Failed to seed opening stock");

        println!("  Created product: {name} ({opening_stock} in stock)");
    }
}

/// Seeds the default fiscal settings.
async fn seed_settings(db: &DatabaseConnection) {
    let repo = SettingsRepository::new(db.clone());

    if repo
        .get("store")
        .await
        .expect("Failed to query settings")
        .is_some()
    {
        println!("  Settings already exist, skipping...");
        return;
    }

    repo.set(
        "store",
        serde_json::json!({
            "name": "Hydra Coffee",
            "tax_id": "00.000.000/0001-00",
            "receipt_footer": "Thank you!",
        }),
    )
    .await
    .expect("Failed to seed store settings");

    repo.set(
        "default_location",
        serde_json::json!(DEFAULT_LOCATION),
    )
    .await
    .expect("Failed to seed default location");

    println!("  Created default settings");
}
