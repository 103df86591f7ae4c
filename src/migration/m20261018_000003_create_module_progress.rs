//! Create module_progress table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModuleProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ModuleProgress::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(ModuleProgress::ModuleId).string_len(255).not_null())
                    .col(ColumnDef::new(ModuleProgress::ModuleTitle).string_len(255))
                    .col(
                        ColumnDef::new(ModuleProgress::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::TimeSpent)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ModuleProgress::WatchTimes).json_binary().not_null())
                    .col(
                        ColumnDef::new(ModuleProgress::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ModuleProgress::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ModuleProgress::LastAccessed)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_progress_user_module")
                    .table(ModuleProgress::Table)
                    .col(ModuleProgress::UserId)
                    .col(ModuleProgress::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModuleProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ModuleProgress {
    Table,
    Id,
    UserId,
    ModuleId,
    ModuleTitle,
    Progress,
    Completed,
    TimeSpent,
    WatchTimes,
    StartedAt,
    CompletedAt,
    LastAccessed,
}
