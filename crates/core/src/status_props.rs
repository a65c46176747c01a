//! Property-based tests for the status machines.

use proptest::prelude::*;

use crate::status::{
    ReceivableStatus, SaleStatus, ensure_cancellable, ensure_editable, ensure_settleable,
};

fn sale_status_strategy() -> impl Strategy<Value = SaleStatus> {
    prop_oneof![
        Just(SaleStatus::Finalized),
        Just(SaleStatus::Cancelled),
        Just(SaleStatus::Edited),
    ]
}

fn receivable_status_strategy() -> impl Strategy<Value = ReceivableStatus> {
    prop_oneof![
        Just(ReceivableStatus::InDebt),
        Just(ReceivableStatus::Settled),
        Just(ReceivableStatus::Cancelled),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A sale accepts cancel and edit exactly when it is finalized; the
    /// two guards never disagree about which states are live.
    #[test]
    fn prop_sale_guards_agree(status in sale_status_strategy()) {
        let cancellable = ensure_cancellable(status).is_ok();
        let editable = ensure_editable(status).is_ok();

        prop_assert_eq!(cancellable, status == SaleStatus::Finalized);
        prop_assert_eq!(editable, status == SaleStatus::Finalized);
    }

    /// Settlement is one-directional: only outstanding receivables pass.
    #[test]
    fn prop_settlement_is_one_directional(status in receivable_status_strategy()) {
        prop_assert_eq!(
            ensure_settleable(status).is_ok(),
            status == ReceivableStatus::InDebt
        );
    }
}
