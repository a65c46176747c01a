//! Property-based tests for cart validation and totals.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cart::{CartError, CartItem, compute_total, validate_cart};

/// Strategy for a well-formed cart line.
fn valid_item_strategy() -> impl Strategy<Value = CartItem> {
    (1i32..1_000, 0i64..100_000).prop_map(|(quantity, cents)| {
        let unit_price = Decimal::new(cents, 2);
        CartItem {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price,
            subtotal: unit_price * Decimal::from(quantity),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any non-empty cart of well-formed lines validates.
    #[test]
    fn prop_valid_cart_accepted(items in prop::collection::vec(valid_item_strategy(), 1..10)) {
        prop_assert!(validate_cart(&items).is_ok());
    }

    /// The total always equals the sum of line subtotals.
    #[test]
    fn prop_total_is_sum_of_subtotals(items in prop::collection::vec(valid_item_strategy(), 1..10)) {
        let expected: Decimal = items.iter().map(|i| i.subtotal).sum();
        prop_assert_eq!(compute_total(&items), expected);
    }

    /// Corrupting any one line's quantity to a non-positive value fails
    /// validation at that line.
    #[test]
    fn prop_nonpositive_quantity_rejected(
        mut items in prop::collection::vec(valid_item_strategy(), 1..10),
        corrupt in 0usize..10,
        bad_quantity in -100i32..=0,
    ) {
        let corrupt = corrupt % items.len();
        items[corrupt].quantity = bad_quantity;

        // Lines before the corrupted one stay valid, so validation must
        // point at the corrupted index.
        match validate_cart(&items) {
            Err(CartError::InvalidQuantity { index, quantity }) => {
                prop_assert_eq!(index, corrupt);
                prop_assert_eq!(quantity, bad_quantity);
            }
            other => prop_assert!(false, "expected InvalidQuantity, got {:?}", other.err()),
        }
    }

    /// A subtotal that disagrees with quantity * unit price is rejected.
    #[test]
    fn prop_subtotal_mismatch_rejected(
        mut items in prop::collection::vec(valid_item_strategy(), 1..10),
        corrupt in 0usize..10,
        drift_cents in 1i64..1_000,
    ) {
        let corrupt = corrupt % items.len();
        items[corrupt].subtotal += Decimal::new(drift_cents, 2);

        match validate_cart(&items) {
            Err(CartError::SubtotalMismatch { index, .. }) => prop_assert_eq!(index, corrupt),
            other => prop_assert!(false, "expected SubtotalMismatch, got {:?}", other.err()),
        }
    }
}
