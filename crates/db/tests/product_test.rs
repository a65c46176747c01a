//! Integration tests for the product catalog.

mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use common::setup_db;
use hydra_db::entities::sea_orm_active_enums::{ProductCategory, ProductStatus};
use hydra_db::{
    CreateProductInput, ProductError, ProductFilter, ProductRepository, UpdateProductInput,
};

fn espresso_input() -> CreateProductInput {
    CreateProductInput {
        name: "Espresso".to_string(),
        category: ProductCategory::Beverage,
        barcode: Some("7890001".to_string()),
        price: dec!(6.00),
        min_stock: Some(dec!(10)),
    }
}

#[tokio::test]
async fn test_create_and_fetch_product() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let created = repo.create(espresso_input()).await.unwrap();
    assert_eq!(created.status, ProductStatus::Active);

    let fetched = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, "Espresso");
    assert_eq!(fetched.price, dec!(6.00));
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let result = repo
        .create(CreateProductInput {
            name: "  ".to_string(),
            ..espresso_input()
        })
        .await;

    assert!(matches!(result, Err(ProductError::Validation(_))));
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let result = repo
        .create(CreateProductInput {
            price: dec!(-1.00),
            ..espresso_input()
        })
        .await;

    assert!(matches!(result, Err(ProductError::Validation(_))));
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());
    let product = repo.create(espresso_input()).await.unwrap();

    let updated = repo
        .update(
            product.id,
            UpdateProductInput {
                price: Some(dec!(6.50)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, dec!(6.50));
    assert_eq!(updated.name, "Espresso");
    assert_eq!(updated.barcode.as_deref(), Some("7890001"));
}

#[tokio::test]
async fn test_update_can_clear_barcode() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());
    let product = repo.create(espresso_input()).await.unwrap();

    let updated = repo
        .update(
            product.id,
            UpdateProductInput {
                barcode: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.barcode.is_none());
}

#[tokio::test]
async fn test_deactivate_is_soft() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());
    let product = repo.create(espresso_input()).await.unwrap();

    let deactivated = repo.deactivate(product.id).await.unwrap();
    assert_eq!(deactivated.status, ProductStatus::Inactive);

    // Still fetchable for history.
    let fetched = repo.find_by_id(product.id).await.unwrap();
    assert_eq!(fetched.status, ProductStatus::Inactive);
}

#[tokio::test]
async fn test_missing_product_not_found() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let result = repo.find_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_list_filters_by_category_and_status() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db.clone());

    repo.create(espresso_input()).await.unwrap();
    let cake = repo
        .create(CreateProductInput {
            name: "Carrot Cake".to_string(),
            category: ProductCategory::Food,
            barcode: None,
            price: dec!(10.50),
            min_stock: None,
        })
        .await
        .unwrap();
    repo.deactivate(cake.id).await.unwrap();

    let beverages = repo
        .list(ProductFilter {
            category: Some(ProductCategory::Beverage),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(beverages.len(), 1);
    assert_eq!(beverages[0].name, "Espresso");

    let active = repo
        .list(ProductFilter {
            status: Some(ProductStatus::Active),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);

    let by_name = repo
        .list(ProductFilter {
            name_contains: Some("Carrot".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Carrot Cake");
}
