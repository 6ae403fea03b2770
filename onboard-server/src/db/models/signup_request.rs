//! Signup Request Model

use serde::{Deserialize, Serialize};
use shared::Role;
use surrealdb::RecordId;

use super::serde_helpers;

/// Signup request ID type
pub type SignupRequestId = RecordId;

/// Settlement state of a signup request.
///
/// Write-once: once approved or denied a request never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStatus {
    Pending,
    Approved,
    Denied,
}

impl SignupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupStatus::Pending => "pending",
            SignupStatus::Approved => "approved",
            SignupStatus::Denied => "denied",
        }
    }
}

/// Pending self-registration awaiting IT Manager approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<SignupRequestId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub status: SignupStatus,
    pub created_at: i64,
}
