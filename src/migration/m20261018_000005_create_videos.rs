//! Create videos and user_video_progress tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::VideoId)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::ModuleId).string_len(255).not_null())
                    .col(ColumnDef::new(Videos::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Videos::Duration).double())
                    .col(ColumnDef::new(Videos::Url).string_len(500))
                    .col(
                        ColumnDef::new(Videos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Videos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserVideoProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserVideoProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::UserId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::VideoId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserVideoProgress::ModuleId).string_len(255))
                    .col(
                        ColumnDef::new(UserVideoProgress::Progress)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::CurrentPosition)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::Duration)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserVideoProgress::WatchCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(UserVideoProgress::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UserVideoProgress::LastWatched)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_video_progress_user_video")
                    .table(UserVideoProgress::Table)
                    .col(UserVideoProgress::UserId)
                    .col(UserVideoProgress::VideoId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserVideoProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    VideoId,
    ModuleId,
    Title,
    Duration,
    Url,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserVideoProgress {
    Table,
    Id,
    UserId,
    VideoId,
    ModuleId,
    Progress,
    CurrentPosition,
    Duration,
    Completed,
    WatchCount,
    CompletedAt,
    LastWatched,
}
