//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The schema is written
//! with the schema-builder DSL so the same migration runs on Postgres in
//! production and on SQLite in the integration test suite.

pub use sea_orm_migration::prelude::*;

mod m20260830_000001_initial;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260830_000001_initial::Migration)]
    }
}
