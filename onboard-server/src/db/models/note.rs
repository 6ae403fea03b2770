//! Note Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Note ID type
pub type NoteId = RecordId;

/// Free-form note shared by the whole team.
///
/// Any authenticated user may edit or delete any note; there is no
/// ownership restriction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<NoteId>,
    pub author: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub content: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Create note payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteCreate {
    pub title: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub content: String,
}

/// Update note payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub content: String,
}
