//! Create learning_stats table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LearningStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LearningStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LearningStats::UserId)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(LearningStats::TotalModules)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LearningStats::CompletedModules)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LearningStats::TotalTimeSpent)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LearningStats::CurrentStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LearningStats::LongestStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LearningStats::Achievements).json_binary().not_null())
                    .col(ColumnDef::new(LearningStats::LastActivity).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(LearningStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LearningStats {
    Table,
    Id,
    UserId,
    TotalModules,
    CompletedModules,
    TotalTimeSpent,
    CurrentStreak,
    LongestStreak,
    Achievements,
    LastActivity,
    UpdatedAt,
}
