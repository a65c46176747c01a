//! Sale and receivable status machines.
//!
//! Both lifecycles are strictly one-way: a sale leaves `finalized` exactly
//! once (to `cancelled` or `edited`) and never comes back; a receivable
//! leaves `in_debt` exactly once (to `settled` or `cancelled`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Committed and counted; the only state that accepts cancel/edit.
    Finalized,
    /// Reversed; stock restored, receivable (if any) cancelled.
    Cancelled,
    /// Superseded by a replacement sale carrying the same number.
    Edited,
}

impl SaleStatus {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finalized => "finalized",
            Self::Cancelled => "cancelled",
            Self::Edited => "edited",
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an accounts-receivable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    /// Outstanding debt owed by a collaborator.
    InDebt,
    /// Paid off.
    Settled,
    /// Voided together with its originating sale.
    Cancelled,
}

impl ReceivableStatus {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InDebt => "in_debt",
            Self::Settled => "settled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for illegal status transitions.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Sale is not in a cancellable state.
    #[error("Sale cannot be cancelled: sale already has status {0}")]
    NotCancellable(SaleStatus),

    /// Sale is not in an editable state.
    #[error("Sale cannot be edited: sale already has status {0}")]
    NotEditable(SaleStatus),

    /// Receivable is not outstanding.
    #[error("Receivable cannot be settled: receivable has status {0}")]
    NotSettleable(ReceivableStatus),
}

/// Checks that a sale may be cancelled.
///
/// Cancelling an already-cancelled or edited sale is rejected, never
/// silently accepted: a second cancellation would double-credit stock.
pub const fn ensure_cancellable(status: SaleStatus) -> Result<(), StatusError> {
    match status {
        SaleStatus::Finalized => Ok(()),
        SaleStatus::Cancelled | SaleStatus::Edited => Err(StatusError::NotCancellable(status)),
    }
}

/// Checks that a sale may be edited (superseded).
pub const fn ensure_editable(status: SaleStatus) -> Result<(), StatusError> {
    match status {
        SaleStatus::Finalized => Ok(()),
        SaleStatus::Cancelled | SaleStatus::Edited => Err(StatusError::NotEditable(status)),
    }
}

/// Checks that a receivable may be settled.
pub const fn ensure_settleable(status: ReceivableStatus) -> Result<(), StatusError> {
    match status {
        ReceivableStatus::InDebt => Ok(()),
        ReceivableStatus::Settled | ReceivableStatus::Cancelled => {
            Err(StatusError::NotSettleable(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalized_is_cancellable_and_editable() {
        assert!(ensure_cancellable(SaleStatus::Finalized).is_ok());
        assert!(ensure_editable(SaleStatus::Finalized).is_ok());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(matches!(
            ensure_cancellable(SaleStatus::Cancelled),
            Err(StatusError::NotCancellable(SaleStatus::Cancelled))
        ));
        assert!(matches!(
            ensure_editable(SaleStatus::Cancelled),
            Err(StatusError::NotEditable(SaleStatus::Cancelled))
        ));
    }

    #[test]
    fn test_edited_is_terminal() {
        assert!(ensure_cancellable(SaleStatus::Edited).is_err());
        assert!(ensure_editable(SaleStatus::Edited).is_err());
    }

    #[test]
    fn test_only_in_debt_is_settleable() {
        assert!(ensure_settleable(ReceivableStatus::InDebt).is_ok());
        assert!(ensure_settleable(ReceivableStatus::Settled).is_err());
        assert!(ensure_settleable(ReceivableStatus::Cancelled).is_err());
    }

    #[test]
    fn test_error_messages_name_the_status() {
        let err = ensure_cancellable(SaleStatus::Edited).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sale cannot be cancelled: sale already has status edited"
        );
    }
}
