//! Create swap_requests table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// At most one pending request per ordered (requester, receiver) pair.
/// Rejected and accepted rows for the same pair may accumulate, so the
/// index is partial. Supported by both SQLite and PostgreSQL.
const PENDING_PAIR_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_swap_requests_pending_pair \
     ON swap_requests (requester_id, receiver_id) WHERE status = 'pending'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SwapRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SwapRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SwapRequests::RequesterId).integer().not_null())
                    .col(ColumnDef::new(SwapRequests::ReceiverId).integer().not_null())
                    .col(
                        ColumnDef::new(SwapRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(SwapRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_swap_requests_requester")
                    .table(SwapRequests::Table)
                    .col(SwapRequests::RequesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_swap_requests_receiver")
                    .table(SwapRequests::Table)
                    .col(SwapRequests::ReceiverId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(PENDING_PAIR_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SwapRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SwapRequests {
    Table,
    Id,
    RequesterId,
    ReceiverId,
    Status,
    CreatedAt,
}
