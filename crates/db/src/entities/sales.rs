//! `SeaORM` Entity for the sales table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CustomerType, PaymentMethod, SaleStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Zero-padded human-facing number. A replacement sale created by an
    /// edit carries the number of the sale it supersedes.
    pub sale_number: String,
    pub sale_date: DateTimeWithTimeZone,
    pub location: String,
    pub customer_type: CustomerType,
    pub collaborator_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
    pub status: SaleStatus,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub cancel_reason: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
    pub edited_at: Option<DateTimeWithTimeZone>,
    /// Id of the sale this one replaces, set on edit replacements.
    pub supersedes: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_items::Entity")]
    SaleItems,
    #[sea_orm(has_many = "super::receivables::Entity")]
    Receivables,
    #[sea_orm(
        belongs_to = "super::collaborators::Entity",
        from = "Column::CollaboratorId",
        to = "super::collaborators::Column::Id"
    )]
    Collaborators,
}

impl Related<super::sale_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl Related<super::receivables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receivables.def()
    }
}

impl Related<super::collaborators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaborators.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
