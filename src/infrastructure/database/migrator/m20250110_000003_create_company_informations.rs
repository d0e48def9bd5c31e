//! Migration to create the company_informations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyInformations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyInformations::Iata)
                            .string_len(8)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyInformations::Name).string_len(255).null())
                    .col(ColumnDef::new(CompanyInformations::Country).string_len(100).null())
                    .col(ColumnDef::new(CompanyInformations::City).string_len(100).null())
                    .col(ColumnDef::new(CompanyInformations::State).string_len(100).null())
                    .col(ColumnDef::new(CompanyInformations::ZipCode).string_len(20).null())
                    .col(ColumnDef::new(CompanyInformations::Address).string_len(255).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyInformations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CompanyInformations {
    Table,
    Iata,
    Name,
    Country,
    City,
    State,
    ZipCode,
    Address,
}
