//! Create learning_history table (append-only activity log).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearningHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LearningHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LearningHistory::UserId).string_len(255).not_null())
                    .col(
                        ColumnDef::new(LearningHistory::ActivityType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LearningHistory::ModuleId).string_len(255))
                    .col(ColumnDef::new(LearningHistory::Progress).integer())
                    .col(
                        ColumnDef::new(LearningHistory::TimeSpent)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LearningHistory::Metadata).json_binary())
                    .col(
                        ColumnDef::new(LearningHistory::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_learning_history_user_time")
                    .table(LearningHistory::Table)
                    .col(LearningHistory::UserId)
                    .col(LearningHistory::OccurredAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LearningHistory {
    Table,
    Id,
    UserId,
    ActivityType,
    ModuleId,
    Progress,
    TimeSpent,
    Metadata,
    OccurredAt,
}
