//! Initial database migration.
//!
//! Creates the catalog, stock ledger, sales, receivables, audit and
//! configuration tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // Identity
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::DisplayName).string_len(128).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(ColumnDef::new(Users::Active).boolean().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collaborators::Table)
                    .col(
                        ColumnDef::new(Collaborators::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collaborators::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Collaborators::Code).string_len(32))
                    .col(ColumnDef::new(Collaborators::Active).boolean().not_null())
                    .col(
                        ColumnDef::new(Collaborators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Collaborators::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Catalog & stock ledger
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Products::Category).string_len(16).not_null())
                    .col(ColumnDef::new(Products::Barcode).string_len(64))
                    .col(
                        ColumnDef::new(Products::Price)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::MinStock).decimal_len(16, 3))
                    .col(ColumnDef::new(Products::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_barcode")
                    .table(Products::Table)
                    .col(Products::Barcode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockEntries::Table)
                    .col(
                        ColumnDef::new(StockEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockEntries::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(StockEntries::Location)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::Balance)
                            .decimal_len(16, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_entries_product")
                            .from(StockEntries::Table, StockEntries::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stock_entries_product_location")
                    .table(StockEntries::Table)
                    .col(StockEntries::ProductId)
                    .col(StockEntries::Location)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryEntries::Table)
                    .col(
                        ColumnDef::new(InventoryEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InventoryEntries::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(InventoryEntries::Location)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryEntries::Quantity)
                            .decimal_len(16, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryEntries::Kind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryEntries::PreviousBalance)
                            .decimal_len(16, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryEntries::NewBalance)
                            .decimal_len(16, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryEntries::RecordedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryEntries::Note).string())
                    .col(
                        ColumnDef::new(InventoryEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_entries_product")
                            .from(InventoryEntries::Table, InventoryEntries::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Sales
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Counters::Table)
                    .col(
                        ColumnDef::new(Counters::Key)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Counters::Value).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Sale numbers are allocated by bumping this row inside the sale
        // transaction; the row lock serializes concurrent allocations.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Counters::Table)
                    .columns([Counters::Key, Counters::Value])
                    .values_panic(["sale_number".into(), 0i64.into()])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .col(ColumnDef::new(Sales::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sales::SaleNumber).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Sales::SaleDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::Location).string_len(64).not_null())
                    .col(ColumnDef::new(Sales::CustomerType).string_len(16).not_null())
                    .col(ColumnDef::new(Sales::CollaboratorId).uuid())
                    .col(
                        ColumnDef::new(Sales::PaymentMethod)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::Total).decimal_len(16, 2).not_null())
                    .col(ColumnDef::new(Sales::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Sales::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::CancelReason).string())
                    .col(ColumnDef::new(Sales::CancelledBy).uuid())
                    .col(ColumnDef::new(Sales::CancelledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sales::EditedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sales::Supersedes).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_collaborator")
                            .from(Sales::Table, Sales::CollaboratorId)
                            .to(Collaborators::Table, Collaborators::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: a replacement sale reuses the number of the sale it
        // supersedes.
        manager
            .create_index(
                Index::create()
                    .name("idx_sales_sale_number")
                    .table(Sales::Table)
                    .col(Sales::SaleNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_location_date")
                    .table(Sales::Table)
                    .col(Sales::Location)
                    .col(Sales::SaleDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleItems::Table)
                    .col(ColumnDef::new(SaleItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SaleItems::SaleId).uuid().not_null())
                    .col(ColumnDef::new(SaleItems::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(SaleItems::ProductName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SaleItems::Barcode).string_len(64))
                    .col(ColumnDef::new(SaleItems::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(SaleItems::UnitPrice)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SaleItems::Subtotal)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_items_sale")
                            .from(SaleItems::Table, SaleItems::SaleId)
                            .to(Sales::Table, Sales::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_items_product")
                            .from(SaleItems::Table, SaleItems::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_items_sale")
                    .table(SaleItems::Table)
                    .col(SaleItems::SaleId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Accounts receivable
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Receivables::Table)
                    .col(
                        ColumnDef::new(Receivables::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Receivables::SaleId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Receivables::CollaboratorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Receivables::Amount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receivables::SaleDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receivables::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Receivables::SettlementMethod).string_len(16))
                    .col(ColumnDef::new(Receivables::SettledBy).uuid())
                    .col(ColumnDef::new(Receivables::SettledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Receivables::CancellationNote).string())
                    .col(ColumnDef::new(Receivables::CancelledBy).uuid())
                    .col(
                        ColumnDef::new(Receivables::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receivables_sale")
                            .from(Receivables::Table, Receivables::SaleId)
                            .to(Sales::Table, Sales::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receivables_collaborator")
                            .from(Receivables::Table, Receivables::CollaboratorId)
                            .to(Collaborators::Table, Collaborators::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receivables_collaborator_status")
                    .table(Receivables::Table)
                    .col(Receivables::CollaboratorId)
                    .col(Receivables::Status)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // Configuration
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).json().not_null())
                    .col(
                        ColumnDef::new(Settings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Receivables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SaleItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Counters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collaborators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    DisplayName,
    PasswordHash,
    Role,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Collaborators {
    Table,
    Id,
    Name,
    Code,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Category,
    Barcode,
    Price,
    MinStock,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockEntries {
    Table,
    Id,
    ProductId,
    Location,
    Balance,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryEntries {
    Table,
    Id,
    ProductId,
    Location,
    Quantity,
    Kind,
    PreviousBalance,
    NewBalance,
    RecordedBy,
    Note,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Counters {
    Table,
    Key,
    Value,
}

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    SaleNumber,
    SaleDate,
    Location,
    CustomerType,
    CollaboratorId,
    PaymentMethod,
    Total,
    Status,
    CreatedBy,
    CreatedAt,
    CancelReason,
    CancelledBy,
    CancelledAt,
    EditedAt,
    Supersedes,
}

#[derive(DeriveIden)]
enum SaleItems {
    Table,
    Id,
    SaleId,
    ProductId,
    ProductName,
    Barcode,
    Quantity,
    UnitPrice,
    Subtotal,
}

#[derive(DeriveIden)]
enum Receivables {
    Table,
    Id,
    SaleId,
    CollaboratorId,
    Amount,
    SaleDate,
    Status,
    SettlementMethod,
    SettledBy,
    SettledAt,
    CancellationNote,
    CancelledBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Key,
    Value,
    UpdatedAt,
}
