//! Inventory repository: manual stock movements with an audit trail.
//!
//! Every recorded entry writes two things inside one transaction: the
//! ledger balance mutation and an immutable audit row capturing the
//! before and after balances.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{inventory_entries, sea_orm_active_enums::EntryKind};
use crate::stock;

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an inventory entry.
#[derive(Debug, Clone)]
pub struct RecordEntryInput {
    /// Product whose stock is moving.
    pub product_id: Uuid,
    /// Location of the ledger row.
    pub location: String,
    /// Entry quantity. Additive entries apply it as a signed delta;
    /// overwrite entries install it as the new balance.
    pub quantity: Decimal,
    /// Whether the quantity is a delta or a replacement balance.
    pub kind: EntryKind,
    /// User recording the entry.
    pub recorded_by: Uuid,
    /// Optional free-form note (supplier, count sheet reference).
    pub note: Option<String>,
}

/// Inventory repository for recording and listing stock movements.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an inventory entry and applies it to the stock ledger.
    ///
    /// Additive entries shift the balance by `quantity`, which may be
    /// negative for shrinkage write-offs. Overwrite entries set the
    /// balance to `quantity` outright, as after a physical count.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank location, a zero additive
    /// delta, or a negative overwrite balance, and a database error if
    /// the transaction fails.
    pub async fn record_entry(
        &self,
        input: RecordEntryInput,
    ) -> Result<inventory_entries::Model, InventoryError> {
        if input.location.trim().is_empty() {
            return Err(InventoryError::Validation(
                "location is required".to_string(),
            ));
        }
        match input.kind {
            EntryKind::Additive if input.quantity == Decimal::ZERO => {
                return Err(InventoryError::Validation(
                    "additive entry quantity must be non-zero".to_string(),
                ));
            }
            EntryKind::Overwrite if input.quantity < Decimal::ZERO => {
                return Err(InventoryError::Validation(
                    "overwrite entry balance cannot be negative".to_string(),
                ));
            }
            _ => {}
        }

        let txn = self.db.begin().await?;

        let previous = stock::read(&txn, input.product_id, &input.location).await?;
        let new_balance = match input.kind {
            EntryKind::Additive => previous + input.quantity,
            EntryKind::Overwrite => input.quantity,
        };
        stock::adjust(
            &txn,
            input.product_id,
            &input.location,
            new_balance - previous,
        )
        .await?;

        let entry = inventory_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(input.product_id),
            location: Set(input.location.clone()),
            quantity: Set(input.quantity),
            kind: Set(input.kind),
            previous_balance: Set(previous),
            new_balance: Set(new_balance),
            recorded_by: Set(input.recorded_by),
            note: Set(input.note),
            created_at: Set(Utc::now().into()),
        };
        let entry = entry.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            product_id = %entry.product_id,
            location = %entry.location,
            previous = %entry.previous_balance,
            new = %entry.new_balance,
            "Inventory entry recorded"
        );

        Ok(entry)
    }

    /// Lists entries for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<inventory_entries::Model>, InventoryError> {
        let entries = inventory_entries::Entity::find()
            .filter(inventory_entries::Column::ProductId.eq(product_id))
            .order_by_desc(inventory_entries::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(entries)
    }
}
