//! Create user_bookmarks and user_notes tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBookmarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBookmarks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBookmarks::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(UserBookmarks::ModuleId).string_len(255).not_null())
                    .col(
                        ColumnDef::new(UserBookmarks::SectionId)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(UserBookmarks::Title).string_len(255))
                    .col(
                        ColumnDef::new(UserBookmarks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_bookmarks_unique")
                    .table(UserBookmarks::Table)
                    .col(UserBookmarks::UserId)
                    .col(UserBookmarks::ModuleId)
                    .col(UserBookmarks::SectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserNotes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserNotes::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(UserNotes::ModuleId).string_len(255).not_null())
                    .col(ColumnDef::new(UserNotes::Content).text().not_null())
                    .col(
                        ColumnDef::new(UserNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserNotes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_notes_user_module")
                    .table(UserNotes::Table)
                    .col(UserNotes::UserId)
                    .col(UserNotes::ModuleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserNotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserBookmarks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserBookmarks {
    Table,
    Id,
    UserId,
    ModuleId,
    SectionId,
    Title,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserNotes {
    Table,
    Id,
    UserId,
    ModuleId,
    Content,
    CreatedAt,
    UpdatedAt,
}
