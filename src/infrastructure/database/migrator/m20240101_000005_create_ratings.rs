//! Create ratings table

use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_swap_requests::SwapRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::SwapRequestId).integer().not_null())
                    .col(ColumnDef::new(Ratings::Score).integer().not_null())
                    .col(
                        ColumnDef::new(Ratings::Feedback)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_swap_request")
                            .from(Ratings::Table, Ratings::SwapRequestId)
                            .to(SwapRequests::Table, SwapRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_swap_request")
                    .table(Ratings::Table)
                    .col(Ratings::SwapRequestId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ratings {
    Table,
    Id,
    SwapRequestId,
    Score,
    Feedback,
}
