//! Employee Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Day label -> task name -> done
pub type TaskMap = BTreeMap<String, BTreeMap<String, bool>>;

/// Access-control item name -> done
pub type AccessControlMap = BTreeMap<String, bool>;

/// Onboarding lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardStatus {
    InProgress,
    Completed,
}

impl Default for OnboardStatus {
    fn default() -> Self {
        OnboardStatus::InProgress
    }
}

/// New hire tracked through the onboarding workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Campus I-Number
    pub id_number: String,
    /// Calendar date, "YYYY-MM-DD"
    pub date_of_birth: String,
    /// Unix milliseconds
    pub start_date: i64,
    #[serde(default)]
    pub status: OnboardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<i64>,
    #[serde(default)]
    pub tasks: TaskMap,
    #[serde(default)]
    pub access_controls: AccessControlMap,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub id_number: String,
    pub date_of_birth: String,
    /// Defaults to submission time when omitted
    #[serde(default)]
    pub start_date: Option<i64>,
}
