//! Create learning_sessions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearningSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LearningSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LearningSessions::SessionId)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(LearningSessions::UserId).string_len(255).not_null())
                    .col(
                        ColumnDef::new(LearningSessions::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LearningSessions::EndTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(LearningSessions::Duration)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LearningSessions::Activities).json_binary().not_null())
                    .col(
                        ColumnDef::new(LearningSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_learning_sessions_user")
                    .table(LearningSessions::Table)
                    .col(LearningSessions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LearningSessions {
    Table,
    Id,
    SessionId,
    UserId,
    StartTime,
    EndTime,
    Duration,
    Activities,
    UpdatedAt,
}
