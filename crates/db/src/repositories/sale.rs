//! Sale repository: the transactional core of the point of sale.
//!
//! Three operations mutate sales, and each one runs stock, sale, and
//! receivable writes inside a single database transaction:
//!
//! - `create_sale` - validates the cart, decrements stock, assigns the
//!   next sale number, and opens a receivable for qualifying on-account
//!   sales.
//! - `cancel_sale` - marks a finalized sale cancelled, restores stock,
//!   and cancels the sale's receivable.
//! - `edit_sale` - supersedes a finalized sale with a replacement that
//!   carries the same sale number, reversing and reapplying stock and
//!   reconciling receivables.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use hydra_core::cart::{CartError, CartItem};
use hydra_core::status::StatusError;
use hydra_core::{
    compute_total, ensure_cancellable, ensure_editable, format_sale_number, requires_receivable,
    stock_check_required, validate_cart,
};

use crate::entities::{
    counters, products, receivables, sale_items, sales,
    sea_orm_active_enums::{
        CustomerType, PaymentMethod, ProductStatus, ReceivableStatus, SaleStatus,
    },
};
use crate::stock;

/// Error types for sale operations.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// Cart failed validation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Malformed input outside the cart itself.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Product missing or inactive.
    #[error("Product not found or inactive: {0}")]
    ProductNotFound(Uuid),

    /// Not enough stock for a normal-customer sale.
    #[error(
        "Insufficient stock for {name}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        /// Product name at sale time.
        name: String,
        /// Balance currently available.
        available: Decimal,
        /// Quantity requested.
        requested: i32,
    },

    /// Sale not found.
    #[error("Sale not found: {0}")]
    NotFound(Uuid),

    /// Operation not legal for the sale's current status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Database error; the enclosing transaction was rolled back.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    /// Sales point the sale happens at.
    pub location: String,
    /// Customer type.
    pub customer_type: CustomerType,
    /// Collaborator buying on account, if any.
    pub collaborator_id: Option<Uuid>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Cart lines.
    pub items: Vec<CartItem>,
    /// User ringing up the sale.
    pub created_by: Uuid,
}

/// Input for cancelling a sale.
#[derive(Debug, Clone)]
pub struct CancelSaleInput {
    /// Sale to cancel.
    pub sale_id: Uuid,
    /// Mandatory cancellation reason.
    pub reason: String,
    /// User performing the cancellation.
    pub cancelled_by: Uuid,
}

/// Input for editing (superseding) a sale.
#[derive(Debug, Clone)]
pub struct EditSaleInput {
    /// Sale to supersede.
    pub sale_id: Uuid,
    /// Replacement cart lines.
    pub items: Vec<CartItem>,
    /// Replacement payment method.
    pub payment_method: PaymentMethod,
    /// Replacement customer type.
    pub customer_type: CustomerType,
    /// Replacement collaborator, if any.
    pub collaborator_id: Option<Uuid>,
    /// User performing the edit.
    pub edited_by: Uuid,
    /// When `true`, the replacement items get the same stock-sufficiency
    /// check as a fresh normal-customer sale. The default `false` keeps
    /// the historical trusted-staff behavior of an unconditional debit.
    pub enforce_stock: bool,
}

/// Filter options for listing sales.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
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
    pub date_from: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Filter by sale date range end.
    pub date_to: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// A sale with its lines and optional receivable.
#[derive(Debug, Clone)]
pub struct SaleWithItems {
    /// Sale header.
    pub sale: sales::Model,
    /// Line items.
    pub items: Vec<sale_items::Model>,
    /// Receivable opened for this sale, if it qualified.
    pub receivable: Option<receivables::Model>,
}

/// Result of an edit: the superseded original and its replacement.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The original sale, now with status `edited`.
    pub original: sales::Model,
    /// The replacement sale.
    pub replacement: SaleWithItems,
}

/// Resolved product snapshot used while building sale lines.
struct ResolvedLine {
    item: CartItem,
    name: String,
    barcode: Option<String>,
}

/// Sale repository for the transactional sale/cancel/edit operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sale: cart validation, stock decrement, sale numbering,
    /// persistence, and receivable creation, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cart violates a validation rule
    /// - A product is missing or inactive
    /// - A normal-customer line exceeds available stock
    /// - The database transaction fails (everything is rolled back)
    pub async fn create_sale(&self, input: CreateSaleInput) -> Result<SaleWithItems, SaleError> {
        validate_cart(&input.items)?;

        if input.location.trim().is_empty() {
            return Err(SaleError::Validation("location is required".to_string()));
        }

        let txn = self.db.begin().await?;

        let lines = resolve_products(&txn, &input.items).await?;
        debit_stock(
            &txn,
            &lines,
            &input.location,
            stock_check_required(input.customer_type.clone().into()),
        )
        .await?;

        let sale_number = allocate_sale_number(&txn).await?;
        let total = compute_total(&input.items);
        let now = Utc::now();
        let sale_id = Uuid::new_v4();

        let sale = sales::ActiveModel {
            id: Set(sale_id),
            sale_number: Set(sale_number),
            sale_date: Set(now.into()),
            location: Set(input.location.clone()),
            customer_type: Set(input.customer_type.clone()),
            collaborator_id: Set(input.collaborator_id),
            payment_method: Set(input.payment_method.clone()),
            total: Set(total),
            status: Set(SaleStatus::Finalized),
            created_by: Set(input.created_by),
            created_at: Set(now.into()),
            ..Default::default()
        };
        let sale = sale.insert(&txn).await?;

        let items = insert_items(&txn, sale_id, &lines).await?;

        let receivable = if requires_receivable(
            input.payment_method.clone().into(),
            input.collaborator_id.is_some(),
        ) {
            // Qualification implies a collaborator is present.
            let collaborator_id = input
                .collaborator_id
                .ok_or_else(|| SaleError::Validation("collaborator is required".to_string()))?;
            Some(insert_receivable(&txn, &sale, collaborator_id).await?)
        } else {
            None
        };

        txn.commit().await?;

        tracing::info!(
            sale_id = %sale.id,
            sale_number = %sale.sale_number,
            total = %sale.total,
            "Sale created"
        );

        Ok(SaleWithItems {
            sale,
            items,
            receivable,
        })
    }

    /// Cancels a finalized sale: status flip with audit fields, stock
    /// restore for every line, and receivable cancellation, in one
    /// transaction.
    ///
    /// Cancellation is deliberately not idempotent: a second attempt fails
    /// with a status error instead of double-crediting stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is empty, the sale is missing or not
    /// finalized, or the transaction fails.
    pub async fn cancel_sale(&self, input: CancelSaleInput) -> Result<sales::Model, SaleError> {
        if input.reason.trim().is_empty() {
            return Err(SaleError::Validation(
                "cancellation reason is required".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let sale = sales::Entity::find_by_id(input.sale_id)
            .one(&txn)
            .await?
            .ok_or(SaleError::NotFound(input.sale_id))?;

        ensure_cancellable(sale.status.clone().into())?;

        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale.id))
            .all(&txn)
            .await?;

        // Unconditional credit, regardless of customer type.
        for item in &items {
            stock::adjust(
                &txn,
                item.product_id,
                &sale.location,
                Decimal::from(item.quantity),
            )
            .await?;
        }

        let now = Utc::now();
        let mut active: sales::ActiveModel = sale.into();
        active.status = Set(SaleStatus::Cancelled);
        active.cancel_reason = Set(Some(input.reason.clone()));
        active.cancelled_by = Set(Some(input.cancelled_by));
        active.cancelled_at = Set(Some(now.into()));
        let sale = active.update(&txn).await?;

        cancel_receivable_for_sale(&txn, sale.id, &input.reason, input.cancelled_by).await?;

        txn.commit().await?;

        tracing::info!(
            sale_id = %sale.id,
            sale_number = %sale.sale_number,
            reason = %input.reason,
            "Sale cancelled"
        );

        Ok(sale)
    }

    /// Supersedes a finalized sale with a replacement carrying the same
    /// sale number, date, and location: restores the original stock,
    /// debits the new items, reconciles receivables, all in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is invalid, the sale is missing or not
    /// finalized, `enforce_stock` is set and a line exceeds available
    /// stock, or the transaction fails.
    pub async fn edit_sale(&self, input: EditSaleInput) -> Result<EditOutcome, SaleError> {
        validate_cart(&input.items)?;

        let txn = self.db.begin().await?;

        let original = sales::Entity::find_by_id(input.sale_id)
            .one(&txn)
            .await?
            .ok_or(SaleError::NotFound(input.sale_id))?;

        ensure_editable(original.status.clone().into())?;

        // Reverse the original stock effect before applying the new one.
        let original_items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(original.id))
            .all(&txn)
            .await?;
        for item in &original_items {
            stock::adjust(
                &txn,
                item.product_id,
                &original.location,
                Decimal::from(item.quantity),
            )
            .await?;
        }

        let lines = resolve_products(&txn, &input.items).await?;
        let check_stock = input.enforce_stock
            && stock_check_required(input.customer_type.clone().into());
        debit_stock(&txn, &lines, &original.location, check_stock).await?;

        let now = Utc::now();
        let total = compute_total(&input.items);

        let mut superseded: sales::ActiveModel = original.clone().into();
        superseded.status = Set(SaleStatus::Edited);
        superseded.edited_at = Set(Some(now.into()));
        let original = superseded.update(&txn).await?;

        let replacement_id = Uuid::new_v4();
        let replacement = sales::ActiveModel {
            id: Set(replacement_id),
            // The replacement keeps the number and date of the sale it
            // supersedes: the commercial event did not change, its
            // contents did.
            sale_number: Set(original.sale_number.clone()),
            sale_date: Set(original.sale_date),
            location: Set(original.location.clone()),
            customer_type: Set(input.customer_type.clone()),
            collaborator_id: Set(input.collaborator_id),
            payment_method: Set(input.payment_method.clone()),
            total: Set(total),
            status: Set(SaleStatus::Finalized),
            created_by: Set(input.edited_by),
            created_at: Set(now.into()),
            supersedes: Set(Some(original.id)),
            ..Default::default()
        };
        let replacement = replacement.insert(&txn).await?;

        let items = insert_items(&txn, replacement_id, &lines).await?;

        // Reconcile receivables: the original's outstanding debt dies with
        // it, and the replacement opens its own when it qualifies.
        cancel_receivable_for_sale(&txn, original.id, "superseded by edit", input.edited_by)
            .await?;

        let receivable = if requires_receivable(
            input.payment_method.clone().into(),
            input.collaborator_id.is_some(),
        ) {
            let collaborator_id = input
                .collaborator_id
                .ok_or_else(|| SaleError::Validation("collaborator is required".to_string()))?;
            Some(insert_receivable(&txn, &replacement, collaborator_id).await?)
        } else {
            None
        };

        txn.commit().await?;

        tracing::info!(
            original_id = %original.id,
            replacement_id = %replacement.id,
            sale_number = %replacement.sale_number,
            "Sale edited"
        );

        Ok(EditOutcome {
            original,
            replacement: SaleWithItems {
                sale: replacement,
                items,
                receivable,
            },
        })
    }

    /// Gets a sale by id with its lines and receivable.
    ///
    /// # Errors
    ///
    /// Returns an error if the sale is missing or the query fails.
    pub async fn get_sale(&self, sale_id: Uuid) -> Result<SaleWithItems, SaleError> {
        let sale = sales::Entity::find_by_id(sale_id)
            .one(&self.db)
            .await?
            .ok_or(SaleError::NotFound(sale_id))?;

        let items = sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale_id))
            .all(&self.db)
            .await?;

        let receivable = receivables::Entity::find()
            .filter(receivables::Column::SaleId.eq(sale_id))
            .one(&self.db)
            .await?;

        Ok(SaleWithItems {
            sale,
            items,
            receivable,
        })
    }

    /// Lists sales with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_sales(&self, filter: SaleFilter) -> Result<Vec<sales::Model>, SaleError> {
        let mut query = sales::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(sales::Column::Status.eq(status));
        }
        if let Some(customer_type) = filter.customer_type {
            query = query.filter(sales::Column::CustomerType.eq(customer_type));
        }
        if let Some(payment_method) = filter.payment_method {
            query = query.filter(sales::Column::PaymentMethod.eq(payment_method));
        }
        if let Some(location) = filter.location {
            query = query.filter(sales::Column::Location.eq(location));
        }
        if let Some(collaborator_id) = filter.collaborator_id {
            query = query.filter(sales::Column::CollaboratorId.eq(collaborator_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(sales::Column::SaleDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(sales::Column::SaleDate.lte(date_to));
        }

        let sales = query
            .order_by_desc(sales::Column::SaleDate)
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(sales)
    }
}

/// Looks up every cart product, failing on missing or inactive ones, and
/// snapshots name and barcode for the sale lines.
async fn resolve_products(
    txn: &DatabaseTransaction,
    items: &[CartItem],
) -> Result<Vec<ResolvedLine>, SaleError> {
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let product = products::Entity::find_by_id(item.product_id)
            .one(txn)
            .await?
            .filter(|p| p.status == ProductStatus::Active)
            .ok_or(SaleError::ProductNotFound(item.product_id))?;

        lines.push(ResolvedLine {
            item: item.clone(),
            name: product.name,
            barcode: product.barcode,
        });
    }

    Ok(lines)
}

/// Debits stock for every line, with or without the sufficiency guard.
async fn debit_stock(
    txn: &DatabaseTransaction,
    lines: &[ResolvedLine],
    location: &str,
    check_sufficiency: bool,
) -> Result<(), SaleError> {
    for line in lines {
        let quantity = Decimal::from(line.item.quantity);

        if check_sufficiency {
            let applied =
                stock::try_decrement(txn, line.item.product_id, location, quantity).await?;
            if !applied {
                let available = stock::read(txn, line.item.product_id, location).await?;
                return Err(SaleError::InsufficientStock {
                    name: line.name.clone(),
                    available,
                    requested: line.item.quantity,
                });
            }
        } else {
            stock::adjust(txn, line.item.product_id, location, -quantity).await?;
        }
    }

    Ok(())
}

/// Counter row that backs sale numbering. Seeded at zero by the initial
/// migration.
const SALE_NUMBER_COUNTER: &str = "sale_number";

/// Allocates the next zero-padded sale number inside the transaction.
///
/// The number comes from bumping the counter row with a relative
/// `UPDATE`; the row lock it takes serializes concurrent allocations, so
/// two sales committing at the same time cannot draw the same number.
/// The bumped value is read back within the same transaction.
async fn allocate_sale_number(txn: &DatabaseTransaction) -> Result<String, SaleError> {
    counters::Entity::update_many()
        .col_expr(
            counters::Column::Value,
            Expr::col(counters::Column::Value).add(Expr::val(1i64)),
        )
        .filter(counters::Column::Key.eq(SALE_NUMBER_COUNTER))
        .exec(txn)
        .await?;

    let counter = counters::Entity::find_by_id(SALE_NUMBER_COUNTER)
        .one(txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("counter row {SALE_NUMBER_COUNTER}")))?;

    let number = u64::try_from(counter.value)
        .map_err(|_| DbErr::Custom(format!("counter {SALE_NUMBER_COUNTER} went negative")))?;

    Ok(format_sale_number(number))
}

/// Inserts the sale lines.
async fn insert_items(
    txn: &DatabaseTransaction,
    sale_id: Uuid,
    lines: &[ResolvedLine],
) -> Result<Vec<sale_items::Model>, SaleError> {
    let mut models = Vec::with_capacity(lines.len());

    for line in lines {
        let item = sale_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            sale_id: Set(sale_id),
            product_id: Set(line.item.product_id),
            product_name: Set(line.name.clone()),
            barcode: Set(line.barcode.clone()),
            quantity: Set(line.item.quantity),
            unit_price: Set(line.item.unit_price),
            subtotal: Set(line.item.subtotal),
        };
        models.push(item.insert(txn).await?);
    }

    Ok(models)
}

/// Opens an `in_debt` receivable for the sale total.
async fn insert_receivable(
    txn: &DatabaseTransaction,
    sale: &sales::Model,
    collaborator_id: Uuid,
) -> Result<receivables::Model, SaleError> {
    let receivable = receivables::ActiveModel {
        id: Set(Uuid::new_v4()),
        sale_id: Set(sale.id),
        collaborator_id: Set(collaborator_id),
        amount: Set(sale.total),
        sale_date: Set(sale.sale_date),
        status: Set(ReceivableStatus::InDebt),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(receivable.insert(txn).await?)
}

/// Cancels the sale's outstanding receivable, if one exists, recording
/// the note and acting user. A settled receivable stays settled; the
/// money already changed hands.
async fn cancel_receivable_for_sale(
    txn: &DatabaseTransaction,
    sale_id: Uuid,
    note: &str,
    cancelled_by: Uuid,
) -> Result<(), SaleError> {
    let Some(receivable) = receivables::Entity::find()
        .filter(receivables::Column::SaleId.eq(sale_id))
        .filter(receivables::Column::Status.eq(ReceivableStatus::InDebt))
        .one(txn)
        .await?
    else {
        return Ok(());
    };

    let mut active: receivables::ActiveModel = receivable.into();
    active.status = Set(ReceivableStatus::Cancelled);
    active.cancellation_note = Set(Some(note.to_string()));
    active.cancelled_by = Set(Some(cancelled_by));
    active.update(txn).await?;

    Ok(())
}
