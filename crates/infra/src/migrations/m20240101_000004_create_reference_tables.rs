//! Migration: address reference data and seed markers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpainProvinces::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SpainProvinces::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(SpainProvinces::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SpainTowns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SpainTowns::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(SpainTowns::Name).string().not_null())
                    .col(ColumnDef::new(SpainTowns::ProvinceId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_spain_towns_province")
                            .from(SpainTowns::Table, SpainTowns::ProvinceId)
                            .to(SpainProvinces::Table, SpainProvinces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AddressTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AddressTypes::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(AddressTypes::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeedMarkers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SeedMarkers::Name).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(SeedMarkers::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            SeedMarkers::Table.into_iden(),
            AddressTypes::Table.into_iden(),
            SpainTowns::Table.into_iden(),
            SpainProvinces::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SpainProvinces {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum SpainTowns {
    Table,
    Id,
    Name,
    ProvinceId,
}

#[derive(DeriveIden)]
enum AddressTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum SeedMarkers {
    Table,
    Name,
    AppliedAt,
}
