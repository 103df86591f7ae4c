//! Note models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::user_note;

/// Request body for POST /notes.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
    pub content: Option<String>,
}

/// Request body for PUT /notes/{id}.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub user_id: Option<String>,
    pub content: Option<String>,
}

/// Query for GET /notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesQuery {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub user_id: String,
    pub module_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user_note::Model> for NoteResponse {
    fn from(m: user_note::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            module_id: m.module_id,
            content: m.content,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
