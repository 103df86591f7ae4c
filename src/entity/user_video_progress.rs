//! Per-user video watch progress, unique per (user_id, video_id).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_video_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub video_id: String,
    pub module_id: Option<String>,
    /// Percentage watched, 0..=100
    pub progress: f64,
    /// Playback position in seconds
    pub current_position: f64,
    pub duration: f64,
    pub completed: bool,
    pub watch_count: i32,
    pub completed_at: Option<DateTimeUtc>,
    pub last_watched: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
