//! Cart line validation and total calculation.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// A single line in a sale cart.
///
/// `unit_price` and the name/barcode snapshots are frozen at sale time so
/// later catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Product being sold.
    pub product_id: Uuid,
    /// Units sold. Must be positive.
    pub quantity: i32,
    /// Price per unit at sale time. Must not be negative.
    pub unit_price: Decimal,
    /// Line subtotal, expected to equal `quantity * unit_price`.
    pub subtotal: Decimal,
}

/// Validation errors for sale carts.
#[derive(Debug, Error)]
pub enum CartError {
    /// Cart has no lines.
    #[error("Sale must have at least one item")]
    Empty,

    /// Line quantity is zero or negative.
    #[error("Item {index}: quantity must be positive, got {quantity}")]
    InvalidQuantity {
        /// Zero-based line index.
        index: usize,
        /// Offending quantity.
        quantity: i32,
    },

    /// Line unit price is negative.
    #[error("Item {index}: unit price must not be negative")]
    NegativeUnitPrice {
        /// Zero-based line index.
        index: usize,
    },

    /// Line subtotal does not equal quantity times unit price.
    #[error("Item {index}: subtotal {actual} does not match quantity * unit price ({expected})")]
    SubtotalMismatch {
        /// Zero-based line index.
        index: usize,
        /// Computed subtotal.
        expected: Decimal,
        /// Submitted subtotal.
        actual: Decimal,
    },
}

/// Validates a cart against the sale invariants.
///
/// # Errors
///
/// Returns the first violated rule: empty cart, non-positive quantity,
/// negative unit price, or a subtotal that disagrees with the line math.
pub fn validate_cart(items: &[CartItem]) -> Result<(), CartError> {
    if items.is_empty() {
        return Err(CartError::Empty);
    }

    for (index, item) in items.iter().enumerate() {
        if item.quantity <= 0 {
            return Err(CartError::InvalidQuantity {
                index,
                quantity: item.quantity,
            });
        }

        if item.unit_price < Decimal::ZERO {
            return Err(CartError::NegativeUnitPrice { index });
        }

        let expected = item.unit_price * Decimal::from(item.quantity);
        if item.subtotal != expected {
            return Err(CartError::SubtotalMismatch {
                index,
                expected,
                actual: item.subtotal,
            });
        }
    }

    Ok(())
}

/// Computes the sale total as the sum of line subtotals.
#[must_use]
pub fn compute_total(items: &[CartItem]) -> Decimal {
    items.iter().map(|i| i.subtotal).sum()
}
