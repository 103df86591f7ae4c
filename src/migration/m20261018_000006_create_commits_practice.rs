//! Create commits_practice table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommitsPractice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommitsPractice::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommitsPractice::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(CommitsPractice::ModuleId).string_len(255))
                    .col(ColumnDef::new(CommitsPractice::CommitMessage).text().not_null())
                    .col(ColumnDef::new(CommitsPractice::ExpectedType).string_len(20))
                    .col(ColumnDef::new(CommitsPractice::ActualType).string_len(20))
                    .col(
                        ColumnDef::new(CommitsPractice::Success)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CommitsPractice::Attempts)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(CommitsPractice::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_commits_practice_user")
                    .table(CommitsPractice::Table)
                    .col(CommitsPractice::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommitsPractice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CommitsPractice {
    Table,
    Id,
    UserId,
    ModuleId,
    CommitMessage,
    ExpectedType,
    ActualType,
    Success,
    Attempts,
    CreatedAt,
}
