//! Database-backed enums, stored as short strings for portability.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use hydra_core::{CustomerType as CoreCustomerType, PaymentMethod as CorePaymentMethod};
use hydra_core::{ReceivableStatus as CoreReceivableStatus, SaleStatus as CoreSaleStatus};

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Food items.
    #[sea_orm(string_value = "food")]
    Food,
    /// Beverages.
    #[sea_orm(string_value = "beverage")]
    Beverage,
}

/// Product status; soft delete is a flip to `Inactive`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Sellable.
    #[sea_orm(string_value = "active")]
    Active,
    /// Hidden from sale; kept for history.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// Customer type on a sale.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Walk-in customer.
    #[sea_orm(string_value = "normal")]
    Normal,
    /// Staff collaborator.
    #[sea_orm(string_value = "collaborator")]
    Collaborator,
}

/// Payment method on a sale or settlement.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Credit card.
    #[sea_orm(string_value = "credit_card")]
    CreditCard,
    /// Debit card.
    #[sea_orm(string_value = "debit_card")]
    DebitCard,
    /// Instant bank transfer.
    #[sea_orm(string_value = "pix")]
    Pix,
    /// Deferred, tracked as a receivable.
    #[sea_orm(string_value = "on_account")]
    OnAccount,
}

/// Sale lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Committed.
    #[sea_orm(string_value = "finalized")]
    Finalized,
    /// Reversed.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Superseded by a replacement sale.
    #[sea_orm(string_value = "edited")]
    Edited,
}

/// Receivable lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    /// Outstanding.
    #[sea_orm(string_value = "in_debt")]
    InDebt,
    /// Paid.
    #[sea_orm(string_value = "settled")]
    Settled,
    /// Voided with its sale.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// How an inventory entry applies to the stock balance.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Adds the quantity to the current balance.
    #[sea_orm(string_value = "additive")]
    Additive,
    /// Replaces the balance with the quantity (stock count correction).
    #[sea_orm(string_value = "overwrite")]
    Overwrite,
}

// Conversions between database enums and the pure domain enums in
// `hydra-core`. The rules live in core; the column types live here.

impl From<CustomerType> for CoreCustomerType {
    fn from(value: CustomerType) -> Self {
        match value {
            CustomerType::Normal => Self::Normal,
            CustomerType::Collaborator => Self::Collaborator,
        }
    }
}

impl From<CoreCustomerType> for CustomerType {
    fn from(value: CoreCustomerType) -> Self {
        match value {
            CoreCustomerType::Normal => Self::Normal,
            CoreCustomerType::Collaborator => Self::Collaborator,
        }
    }
}

impl From<PaymentMethod> for CorePaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::CreditCard => Self::CreditCard,
            PaymentMethod::DebitCard => Self::DebitCard,
            PaymentMethod::Pix => Self::Pix,
            PaymentMethod::OnAccount => Self::OnAccount,
        }
    }
}

impl From<CorePaymentMethod> for PaymentMethod {
    fn from(value: CorePaymentMethod) -> Self {
        match value {
            CorePaymentMethod::Cash => Self::Cash,
            CorePaymentMethod::CreditCard => Self::CreditCard,
            CorePaymentMethod::DebitCard => Self::DebitCard,
            CorePaymentMethod::Pix => Self::Pix,
            CorePaymentMethod::OnAccount => Self::OnAccount,
        }
    }
}

impl From<SaleStatus> for CoreSaleStatus {
    fn from(value: SaleStatus) -> Self {
        match value {
            SaleStatus::Finalized => Self::Finalized,
            SaleStatus::Cancelled => Self::Cancelled,
            SaleStatus::Edited => Self::Edited,
        }
    }
}

impl From<CoreSaleStatus> for SaleStatus {
    fn from(value: CoreSaleStatus) -> Self {
        match value {
            CoreSaleStatus::Finalized => Self::Finalized,
            CoreSaleStatus::Cancelled => Self::Cancelled,
            CoreSaleStatus::Edited => Self::Edited,
        }
    }
}

impl From<ReceivableStatus> for CoreReceivableStatus {
    fn from(value: ReceivableStatus) -> Self {
        match value {
            ReceivableStatus::InDebt => Self::InDebt,
            ReceivableStatus::Settled => Self::Settled,
            ReceivableStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<CoreReceivableStatus> for ReceivableStatus {
    fn from(value: CoreReceivableStatus) -> Self {
        match value {
            CoreReceivableStatus::InDebt => Self::InDebt,
            CoreReceivableStatus::Settled => Self::Settled,
            CoreReceivableStatus::Cancelled => Self::Cancelled,
        }
    }
}
