//! Integration tests for the receivable ledger: lifecycle, settlement,
//! and batch settlement counting.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{LOCATION, seed_collaborator, seed_product, seed_user, setup_db};
use hydra_core::cart::CartItem;
use hydra_db::entities::sea_orm_active_enums::{
    CustomerType, PaymentMethod, ReceivableStatus,
};
use hydra_db::{
    BatchSettleInput, CancelSaleInput, CreateSaleInput, ReceivableError, ReceivableFilter,
    ReceivableRepository, SaleRepository, SettleInput,
};

fn line(product_id: Uuid, quantity: i32, unit_price: Decimal) -> CartItem {
    CartItem {
        product_id,
        quantity,
        unit_price,
        subtotal: unit_price * Decimal::from(quantity),
    }
}

/// Rings up an on-account collaborator sale and returns its receivable id
/// together with the sale id.
async fn on_account_sale(
    repo: &SaleRepository,
    product_id: Uuid,
    collaborator_id: Uuid,
    quantity: i32,
    user_id: Uuid,
) -> (Uuid, Uuid) {
    let sale = repo
        .create_sale(CreateSaleInput {
            location: LOCATION.to_string(),
            customer_type: CustomerType::Collaborator,
            collaborator_id: Some(collaborator_id),
            payment_method: PaymentMethod::OnAccount,
            items: vec![line(product_id, quantity, dec!(6.00))],
            created_by: user_id,
        })
        .await
        .expect("On-account sale should succeed");

    let receivable = sale.receivable.expect("Qualifying sale opens a receivable");
    (sale.sale.id, receivable.id)
}

#[tokio::test]
async fn test_on_account_sale_opens_in_debt_receivable() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (_, receivable_id) =
        on_account_sale(&sale_repo, product_id, collaborator_id, 3, user_id).await;

    let repo = ReceivableRepository::new(db.clone());
    let receivable = repo.find_by_id(receivable_id).await.unwrap();
    assert_eq!(receivable.status, ReceivableStatus::InDebt);
    assert_eq!(receivable.amount, dec!(18.00));
    assert_eq!(receivable.collaborator_id, collaborator_id);
}

#[tokio::test]
async fn test_on_account_without_collaborator_opens_no_receivable() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    // On-account without a collaborator does not qualify for a debt.
    let sale = SaleRepository::new(db.clone())
        .create_sale(CreateSaleInput {
            location: LOCATION.to_string(),
            customer_type: CustomerType::Normal,
            collaborator_id: None,
            payment_method: PaymentMethod::OnAccount,
            items: vec![line(product_id, 1, dec!(6.00))],
            created_by: user_id,
        })
        .await
        .unwrap();

    assert!(sale.receivable.is_none());
}

#[tokio::test]
async fn test_settle_flips_status_and_stamps_audit_fields() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (_, receivable_id) =
        on_account_sale(&sale_repo, product_id, collaborator_id, 2, user_id).await;

    let repo = ReceivableRepository::new(db.clone());
    let settled = repo
        .settle(SettleInput {
            receivable_id,
            method: PaymentMethod::Pix,
            settled_by: user_id,
        })
        .await
        .expect("Settlement should succeed");

    assert_eq!(settled.status, ReceivableStatus::Settled);
    assert_eq!(settled.settlement_method, Some(PaymentMethod::Pix));
    assert_eq!(settled.settled_by, Some(user_id));
    assert!(settled.settled_at.is_some());
}

#[tokio::test]
async fn test_settle_twice_reports_not_found() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (_, receivable_id) =
        on_account_sale(&sale_repo, product_id, collaborator_id, 2, user_id).await;

    let repo = ReceivableRepository::new(db.clone());
    repo.settle(SettleInput {
        receivable_id,
        method: PaymentMethod::Cash,
        settled_by: user_id,
    })
    .await
    .unwrap();

    let second = repo
        .settle(SettleInput {
            receivable_id,
            method: PaymentMethod::Cash,
            settled_by: user_id,
        })
        .await;

    assert!(matches!(second, Err(ReceivableError::NotFound(_))));
}

#[tokio::test]
async fn test_cancel_sale_cancels_outstanding_receivable() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (sale_id, receivable_id) =
        on_account_sale(&sale_repo, product_id, collaborator_id, 2, user_id).await;

    sale_repo
        .cancel_sale(CancelSaleInput {
            sale_id,
            reason: "ordered by mistake".to_string(),
            cancelled_by: user_id,
        })
        .await
        .unwrap();

    let repo = ReceivableRepository::new(db.clone());
    let receivable = repo.find_by_id(receivable_id).await.unwrap();
    assert_eq!(receivable.status, ReceivableStatus::Cancelled);
    assert_eq!(
        receivable.cancellation_note.as_deref(),
        Some("ordered by mistake")
    );
    assert_eq!(receivable.cancelled_by, Some(user_id));
}

#[tokio::test]
async fn test_cancel_sale_leaves_settled_receivable_alone() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(50), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (sale_id, receivable_id) =
        on_account_sale(&sale_repo, product_id, collaborator_id, 2, user_id).await;

    let repo = ReceivableRepository::new(db.clone());
    repo.settle(SettleInput {
        receivable_id,
        method: PaymentMethod::Cash,
        settled_by: user_id,
    })
    .await
    .unwrap();

    sale_repo
        .cancel_sale(CancelSaleInput {
            sale_id,
            reason: "late reversal".to_string(),
            cancelled_by: user_id,
        })
        .await
        .unwrap();

    // The money already changed hands; the settled record stays settled.
    let receivable = repo.find_by_id(receivable_id).await.unwrap();
    assert_eq!(receivable.status, ReceivableStatus::Settled);
}

#[tokio::test]
async fn test_batch_settle_counts_only_modified_rows() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let collaborator_id = seed_collaborator(&db).await;
    let product_id = seed_product(&db, "Espresso", dec!(6.00), dec!(100), user_id).await;

    let sale_repo = SaleRepository::new(db.clone());
    let (_, first) = on_account_sale(&sale_repo, product_id, collaborator_id, 1, user_id).await;
    let (_, second) = on_account_sale(&sale_repo, product_id, collaborator_id, 2, user_id).await;
    let (_, third) = on_account_sale(&sale_repo, product_id, collaborator_id, 3, user_id).await;

    let repo = ReceivableRepository::new(db.clone());
    // Pre-settle one of the three.
    repo.settle(SettleInput {
        receivable_id: second,
        method: PaymentMethod::Cash,
        settled_by: user_id,
    })
    .await
    .unwrap();

    let settled = repo
        .batch_settle(BatchSettleInput {
            receivable_ids: vec![first, second, third, Uuid::new_v4()],
            method: PaymentMethod::Pix,
            settled_by: user_id,
        })
        .await
        .expect("Batch settlement should succeed");

    // Only the two still-outstanding receivables count.
    assert_eq!(settled, 2);

    let outstanding = repo
        .list(ReceivableFilter {
            status: Some(ReceivableStatus::InDebt),
            collaborator_id: Some(collaborator_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(outstanding.is_empty());
}

#[tokio::test]
async fn test_batch_settle_empty_list_rejected() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;

    let repo = ReceivableRepository::new(db.clone());
    let result = repo
        .batch_settle(BatchSettleInput {
            receivable_ids: vec![],
            method: PaymentMethod::Cash,
            settled_by: user_id,
        })
        .await;

    assert!(matches!(result, Err(ReceivableError::Validation(_))));
}
