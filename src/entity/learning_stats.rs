//! Aggregated learning statistics, one row per user.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learning_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: String,
    pub total_modules: i32,
    pub completed_modules: i32,
    pub total_time_spent: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
    /// Array of unlocked achievements
    #[sea_orm(column_type = "JsonBinary")]
    pub achievements: JsonValue,
    pub last_activity: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
