//! `SeaORM` Entity for the receivables table.
//!
//! Exactly one receivable exists per qualifying sale (on-account payment
//! with a collaborator); its lifecycle is tied to the sale's.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentMethod, ReceivableStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receivables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sale_id: Uuid,
    pub collaborator_id: Uuid,
    pub amount: Decimal,
    pub sale_date: DateTimeWithTimeZone,
    pub status: ReceivableStatus,
    pub settlement_method: Option<PaymentMethod>,
    pub settled_by: Option<Uuid>,
    pub settled_at: Option<DateTimeWithTimeZone>,
    pub cancellation_note: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales::Entity",
        from = "Column::SaleId",
        to = "super::sales::Column::Id"
    )]
    Sales,
    #[sea_orm(
        belongs_to = "super::collaborators::Entity",
        from = "Column::CollaboratorId",
        to = "super::collaborators::Column::Id"
    )]
    Collaborators,
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::collaborators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaborators.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
