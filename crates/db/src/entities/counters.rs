//! `SeaORM` Entity for the counters table.
//!
//! Named monotonic counters. Bumping a counter with a relative `UPDATE`
//! inside a transaction takes a row lock, so concurrent allocations of
//! the same counter serialize instead of reading the same value.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
