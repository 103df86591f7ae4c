//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_users;
mod m20261018_000002_create_learning_history;
mod m20261018_000003_create_module_progress;
mod m20261018_000004_create_learning_stats;
mod m20261018_000005_create_videos;
mod m20261018_000006_create_commits_practice;
mod m20261018_000007_create_learning_sessions;
mod m20261018_000008_create_bookmarks_and_notes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_users::Migration),
            Box::new(m20261018_000002_create_learning_history::Migration),
            Box::new(m20261018_000003_create_module_progress::Migration),
            Box::new(m20261018_000004_create_learning_stats::Migration),
            Box::new(m20261018_000005_create_videos::Migration),
            Box::new(m20261018_000006_create_commits_practice::Migration),
            Box::new(m20261018_000007_create_learning_sessions::Migration),
            Box::new(m20261018_000008_create_bookmarks_and_notes::Migration),
        ]
    }
}
