//! Per-user module progress, unique per (user_id, module_id).

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "module_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub module_id: String,
    pub module_title: Option<String>,
    /// 0..=100
    pub progress: i32,
    pub completed: bool,
    /// Accumulated seconds
    pub time_spent: i64,
    /// Array of `{timestamp, seconds}` entries
    #[sea_orm(column_type = "JsonBinary")]
    pub watch_times: JsonValue,
    pub started_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
    pub last_accessed: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
