//! Per-user UI State Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Opaque per-user scratch state persisted across sessions.
///
/// Last-write-wins upsert keyed by email; the server never interprets the
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub email: String,
    pub state: serde_json::Value,
    pub updated_at: i64,
}
