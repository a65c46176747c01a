//! `SeaORM` entity definitions.

pub mod collaborators;
pub mod counters;
pub mod inventory_entries;
pub mod products;
pub mod receivables;
pub mod sale_items;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod settings;
pub mod stock_entries;
pub mod users;
