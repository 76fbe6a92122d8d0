//! Create skills table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Skills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Skills::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // Get-or-create relies on this to converge concurrent inserts
        manager
            .create_index(
                Index::create()
                    .name("idx_skills_name")
                    .table(Skills::Table)
                    .col(Skills::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Skills {
    Table,
    Id,
    Name,
}
