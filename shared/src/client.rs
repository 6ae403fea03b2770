//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Self-service signup form
///
/// IT Manager signups must carry the shared manager code; Trainer signups
/// become pending requests awaiting approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    #[serde(default)]
    pub manager_code: Option<String>,
}

/// Signup outcome reported back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// "created" for direct account creation, "pending" for a queued request
    pub outcome: String,
    pub message: String,
}

// =============================================================================
// Admin API DTOs
// =============================================================================

/// Pending signup request as shown in the admin panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequestInfo {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub status: String,
    pub created_at: i64,
}

/// Role update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    pub email: String,
    pub role: Role,
}
