//! Bookmark models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::user_bookmark;

/// Request body for POST /bookmarks.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBookmarkRequest {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
    pub section_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: i64,
    pub user_id: String,
    pub module_id: String,
    pub section_id: Option<String>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<user_bookmark::Model> for BookmarkResponse {
    fn from(m: user_bookmark::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            module_id: m.module_id,
            section_id: if m.section_id.is_empty() {
                None
            } else {
                Some(m.section_id)
            },
            title: m.title,
            created_at: m.created_at,
        }
    }
}
