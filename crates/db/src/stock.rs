//! Stock Ledger primitives.
//!
//! The (product, location) balance is the only cross-transaction shared
//! mutable resource in the system, so every mutator goes through these
//! helpers. All functions are generic over [`ConnectionTrait`] and are
//! meant to be called with the caller's open database transaction: stock
//! is never read-modified-written outside one.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{products, stock_entries};

/// Reads the current balance for a product at a location.
///
/// A missing ledger row reads as zero.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn read<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    location: &str,
) -> Result<Decimal, DbErr> {
    let entry = stock_entries::Entity::find()
        .filter(stock_entries::Column::ProductId.eq(product_id))
        .filter(stock_entries::Column::Location.eq(location))
        .one(conn)
        .await?;

    Ok(entry.map_or(Decimal::ZERO, |e| e.balance))
}

/// Applies a signed delta to the balance, creating the ledger row on first
/// touch.
///
/// The mutation is a single relative `UPDATE`, so concurrent deltas inside
/// independent transactions compose instead of overwriting each other.
///
/// # Errors
///
/// Returns an error if the update or insert fails.
pub async fn adjust<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    location: &str,
    delta: Decimal,
) -> Result<(), DbErr> {
    let now = Utc::now();

    let result = stock_entries::Entity::update_many()
        .col_expr(
            stock_entries::Column::Balance,
            Expr::col(stock_entries::Column::Balance).add(Expr::val(delta)),
        )
        .col_expr(stock_entries::Column::UpdatedAt, Expr::val(now).into())
        .filter(stock_entries::Column::ProductId.eq(product_id))
        .filter(stock_entries::Column::Location.eq(location))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let entry = stock_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            location: Set(location.to_string()),
            balance: Set(delta),
            updated_at: Set(now.into()),
        };
        entry.insert(conn).await?;
    }

    Ok(())
}

/// Decrements the balance only if at least `quantity` is available.
///
/// Returns `true` when the decrement was applied. The availability check
/// and the decrement are one guarded `UPDATE`, so two concurrent sales
/// cannot both observe sufficient stock and overcommit it below zero.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn try_decrement<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    location: &str,
    quantity: Decimal,
) -> Result<bool, DbErr> {
    let result = stock_entries::Entity::update_many()
        .col_expr(
            stock_entries::Column::Balance,
            Expr::col(stock_entries::Column::Balance).sub(Expr::val(quantity)),
        )
        .col_expr(
            stock_entries::Column::UpdatedAt,
            Expr::val(Utc::now()).into(),
        )
        .filter(stock_entries::Column::ProductId.eq(product_id))
        .filter(stock_entries::Column::Location.eq(location))
        .filter(stock_entries::Column::Balance.gte(quantity))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// One line of the per-location stock overview.
#[derive(Debug, Clone, Serialize)]
pub struct StockLevel {
    /// Product the balance belongs to.
    pub product_id: Uuid,
    /// Product name at read time.
    pub product_name: String,
    /// Current balance at the location.
    pub balance: Decimal,
    /// Reorder threshold, when the product has one.
    pub min_stock: Option<Decimal>,
    /// Whether the balance sits below the reorder threshold.
    pub below_min: bool,
}

/// Lists balances at a location joined with the owning product, flagging
/// rows that fell below the product's reorder threshold.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_for_location<C: ConnectionTrait>(
    conn: &C,
    location: &str,
) -> Result<Vec<StockLevel>, DbErr> {
    let rows = stock_entries::Entity::find()
        .filter(stock_entries::Column::Location.eq(location))
        .find_also_related(products::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(entry, product)| product.map(|p| (entry, p)))
        .map(|(entry, product)| StockLevel {
            product_id: entry.product_id,
            product_name: product.name,
            balance: entry.balance,
            min_stock: product.min_stock,
            below_min: product.min_stock.is_some_and(|min| entry.balance < min),
        })
        .collect())
}
