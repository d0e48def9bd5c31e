//! Migration to create the roles table and seed the default catalogue

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Roles::HasAgentPermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Default decimal-prefix catalogue. Ids double as hierarchy
        // positions: 1 outranks 10, 10 outranks 102, 102 outranks 1021.
        let seed = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Id, Roles::Title, Roles::HasAgentPermission])
            .values_panic([1.into(), "System Administrator".into(), true.into()])
            .values_panic([10.into(), "Admin".into(), true.into()])
            .values_panic([102.into(), "Manager".into(), true.into()])
            .values_panic([1021.into(), "User".into(), false.into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Title,
    HasAgentPermission,
}
