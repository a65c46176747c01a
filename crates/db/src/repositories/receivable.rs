//! Receivable repository: the accounts-receivable ledger.
//!
//! Receivables are created only by the sale repository alongside a
//! qualifying sale; this repository owns settlement (single and batch)
//! and the read side.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{
    receivables,
    sea_orm_active_enums::{PaymentMethod, ReceivableStatus},
};

/// Error types for receivable operations.
#[derive(Debug, thiserror::Error)]
pub enum ReceivableError {
    /// No outstanding receivable with this id.
    #[error("Outstanding receivable not found: {0}")]
    NotFound(Uuid),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for settling a single receivable.
#[derive(Debug, Clone)]
pub struct SettleInput {
    /// Receivable to settle.
    pub receivable_id: Uuid,
    /// How the debt was paid.
    pub method: PaymentMethod,
    /// User recording the settlement.
    pub settled_by: Uuid,
}

/// Input for settling a batch of receivables.
#[derive(Debug, Clone)]
pub struct BatchSettleInput {
    /// Receivables to settle; non-outstanding ones are skipped.
    pub receivable_ids: Vec<Uuid>,
    /// How the debts were paid.
    pub method: PaymentMethod,
    /// User recording the settlement.
    pub settled_by: Uuid,
}

/// Filter options for listing receivables.
#[derive(Debug, Clone, Default)]
pub struct ReceivableFilter {
    /// Filter by status.
    pub status: Option<ReceivableStatus>,
    /// Filter by collaborator.
    pub collaborator_id: Option<Uuid>,
    /// Filter by sale date range start.
    pub date_from: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Filter by sale date range end.
    pub date_to: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Receivable repository for settlement and queries.
#[derive(Debug, Clone)]
pub struct ReceivableRepository {
    db: DatabaseConnection,
}

impl ReceivableRepository {
    /// Creates a new receivable repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Settles a single outstanding receivable.
    ///
    /// Settlement is one-directional: only `in_debt` receivables qualify,
    /// and a receivable that is missing, settled, or cancelled reports as
    /// not found rather than being flipped twice.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no receivable with this id is outstanding, or
    /// a database error.
    pub async fn settle(&self, input: SettleInput) -> Result<receivables::Model, ReceivableError> {
        let receivable = receivables::Entity::find_by_id(input.receivable_id)
            .filter(receivables::Column::Status.eq(ReceivableStatus::InDebt))
            .one(&self.db)
            .await?
            .ok_or(ReceivableError::NotFound(input.receivable_id))?;

        let mut active: receivables::ActiveModel = receivable.into();
        active.status = Set(ReceivableStatus::Settled);
        active.settlement_method = Set(Some(input.method));
        active.settled_by = Set(Some(input.settled_by));
        active.settled_at = Set(Some(Utc::now().into()));
        let settled = active.update(&self.db).await?;

        tracing::info!(
            receivable_id = %settled.id,
            amount = %settled.amount,
            "Receivable settled"
        );

        Ok(settled)
    }

    /// Settles every outstanding receivable in the batch with one stamped
    /// update, and reports how many rows were actually modified.
    ///
    /// Already-settled or cancelled receivables in the set are filtered
    /// out by the match condition, not rejected; a batch that matches
    /// nothing is an informational no-op returning zero.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty id list, or a database
    /// error.
    pub async fn batch_settle(&self, input: BatchSettleInput) -> Result<u64, ReceivableError> {
        if input.receivable_ids.is_empty() {
            return Err(ReceivableError::Validation(
                "at least one receivable id is required".to_string(),
            ));
        }

        let now = Utc::now();
        let result = receivables::Entity::update_many()
            .col_expr(
                receivables::Column::Status,
                Expr::val(ReceivableStatus::Settled).into(),
            )
            .col_expr(
                receivables::Column::SettlementMethod,
                Expr::val(input.method).into(),
            )
            .col_expr(
                receivables::Column::SettledBy,
                Expr::val(input.settled_by).into(),
            )
            .col_expr(receivables::Column::SettledAt, Expr::val(now).into())
            .filter(receivables::Column::Id.is_in(input.receivable_ids))
            .filter(receivables::Column::Status.eq(ReceivableStatus::InDebt))
            .exec(&self.db)
            .await?;

        tracing::info!(modified = result.rows_affected, "Batch settlement applied");

        Ok(result.rows_affected)
    }

    /// Gets a receivable by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<receivables::Model, ReceivableError> {
        receivables::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReceivableError::NotFound(id))
    }

    /// Lists receivables with optional filters, newest sale first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: ReceivableFilter,
    ) -> Result<Vec<receivables::Model>, ReceivableError> {
        let mut query = receivables::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(receivables::Column::Status.eq(status));
        }
        if let Some(collaborator_id) = filter.collaborator_id {
            query = query.filter(receivables::Column::CollaboratorId.eq(collaborator_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(receivables::Column::SaleDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(receivables::Column::SaleDate.lte(date_to));
        }

        let receivables = query
            .order_by_desc(receivables::Column::SaleDate)
            .all(&self.db)
            .await?;

        Ok(receivables)
    }
}
