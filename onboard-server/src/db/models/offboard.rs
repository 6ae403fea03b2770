//! Offboard Ledger Models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// One completed offboarding; append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffboardEvent {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unix milliseconds
    pub date: i64,
}

/// Running-total summary, a singleton record.
///
/// Intended invariant: `total_offboards == count(offboard_event)`. The
/// event insert and the summary increment are separate writes, so the two
/// can drift after a failure between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffboardSummary {
    #[serde(default)]
    pub total_offboards: i64,
    /// "YYYY-MM" -> count
    #[serde(default)]
    pub per_month: BTreeMap<String, i64>,
}
