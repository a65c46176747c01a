//! Payment methods, customer types, and receivable qualification.

use serde::{Deserialize, Serialize};

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the till.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Instant bank transfer.
    Pix,
    /// Deferred payment tracked as a receivable.
    OnAccount,
}

impl PaymentMethod {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Pix => "pix",
            Self::OnAccount => "on_account",
        }
    }

    /// Parses the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "credit_card" => Some(Self::CreditCard),
            "debit_card" => Some(Self::DebitCard),
            "pix" => Some(Self::Pix),
            "on_account" => Some(Self::OnAccount),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is buying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Walk-in customer; stock sufficiency is enforced.
    Normal,
    /// Staff collaborator; may buy past the stock floor (business rule).
    Collaborator,
}

impl CustomerType {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Collaborator => "collaborator",
        }
    }

    /// Parses the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "collaborator" => Some(Self::Collaborator),
            _ => None,
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a sale must open an accounts-receivable entry.
///
/// Exactly the on-account-with-collaborator combination qualifies; an
/// on-account sale without a collaborator opens nothing.
#[must_use]
pub const fn requires_receivable(method: PaymentMethod, has_collaborator: bool) -> bool {
    matches!(method, PaymentMethod::OnAccount) && has_collaborator
}

/// Whether the stock-sufficiency check applies to this customer type.
///
/// Collaborator sales bypass the check by documented business rule.
#[must_use]
pub const fn stock_check_required(customer: CustomerType) -> bool {
    matches!(customer, CustomerType::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentMethod::Cash, "cash")]
    #[case(PaymentMethod::CreditCard, "credit_card")]
    #[case(PaymentMethod::DebitCard, "debit_card")]
    #[case(PaymentMethod::Pix, "pix")]
    #[case(PaymentMethod::OnAccount, "on_account")]
    fn test_payment_method_roundtrip(#[case] method: PaymentMethod, #[case] wire: &str) {
        assert_eq!(method.as_str(), wire);
        assert_eq!(PaymentMethod::parse(wire), Some(method));
    }

    #[test]
    fn test_unknown_payment_method_rejected() {
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_customer_type_roundtrip() {
        assert_eq!(CustomerType::parse("normal"), Some(CustomerType::Normal));
        assert_eq!(
            CustomerType::parse("collaborator"),
            Some(CustomerType::Collaborator)
        );
        assert_eq!(CustomerType::parse("vip"), None);
    }

    #[test]
    fn test_receivable_requires_both_conditions() {
        assert!(requires_receivable(PaymentMethod::OnAccount, true));
        assert!(!requires_receivable(PaymentMethod::OnAccount, false));
        assert!(!requires_receivable(PaymentMethod::Cash, true));
        assert!(!requires_receivable(PaymentMethod::Pix, false));
    }

    #[test]
    fn test_stock_check_only_for_normal_customers() {
        assert!(stock_check_required(CustomerType::Normal));
        assert!(!stock_check_required(CustomerType::Collaborator));
    }
}
