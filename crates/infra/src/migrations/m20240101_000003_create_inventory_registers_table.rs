//! Migration: one inventory register per product.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_catalog_tables::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryRegisters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryRegisters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InventoryRegisters::ProductId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(InventoryRegisters::Quantity).double().not_null())
                    .col(ColumnDef::new(InventoryRegisters::Value).double().not_null())
                    .col(
                        ColumnDef::new(InventoryRegisters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryRegisters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryRegisters::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_registers_product")
                            .from(InventoryRegisters::Table, InventoryRegisters::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryRegisters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InventoryRegisters {
    Table,
    Id,
    ProductId,
    Quantity,
    Value,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
