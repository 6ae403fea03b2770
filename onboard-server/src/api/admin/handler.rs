//! Admin API Handlers
//!
//! The IT Manager panel: signup approvals, trainer management, role
//! updates, and the offboard-table maintenance actions.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::client::{RoleUpdateRequest, SignupRequestInfo, UserInfo};

use crate::core::ServerState;
use crate::db::models::OffboardEvent;
use crate::db::repository::{OffboardRepository, SignupRequestRepository, UserRepository};
use crate::utils::AppResult;

/// Summary counter vs. what is actually on the ledger.
///
/// `total_offboards` and `actual_events` drift apart after a ledger reset
/// (which leaves the summary alone) or a failure between the two
/// offboarding writes; this view is how that drift gets noticed.
#[derive(Debug, Serialize)]
pub struct OffboardStateResponse {
    pub total_offboards: i64,
    pub actual_events: i64,
    pub recent: Vec<OffboardEvent>,
}

/// Signup requests awaiting a decision
pub async fn pending_signup_requests(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<SignupRequestInfo>>> {
    let repo = SignupRequestRepository::new(state.get_db());
    let pending = repo
        .find_pending()
        .await?
        .into_iter()
        .map(|request| SignupRequestInfo {
            id: request.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            email: request.email,
            role: request.role,
            status: request.status.as_str().to_string(),
            created_at: request.created_at,
        })
        .collect();
    Ok(Json(pending))
}

/// Approve a pending signup, creating the account
pub async fn approve_signup(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserInfo>> {
    let requests = SignupRequestRepository::new(state.get_db());
    let users = UserRepository::new(state.get_db());

    let user = requests.approve(&id, &users).await?;
    tracing::info!(email = %user.email, "Signup request approved");

    Ok(Json(UserInfo {
        id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        email: user.email,
        role: user.role,
        created_at: user.created_at,
    }))
}

/// Deny a pending signup
pub async fn deny_signup(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = SignupRequestRepository::new(state.get_db());
    repo.deny(&id).await?;
    tracing::info!(request_id = %id, "Signup request denied");
    Ok(Json(true))
}

/// All trainer accounts
pub async fn list_trainers(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let repo = UserRepository::new(state.get_db());
    let trainers = repo
        .find_trainers()
        .await?
        .into_iter()
        .map(|user| UserInfo {
            id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        })
        .collect();
    Ok(Json(trainers))
}

/// Delete a trainer account
pub async fn delete_trainer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;
    if deleted {
        tracing::info!(user_id = %id, "Trainer account deleted");
    }
    Ok(Json(deleted))
}

/// Change the role recorded for an email
pub async fn update_role(
    State(state): State<ServerState>,
    Json(req): Json<RoleUpdateRequest>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    let updated = repo.update_role(&req.email, req.role).await?;
    if updated {
        tracing::info!(email = %req.email, role = %req.role, "User role updated");
    }
    Ok(Json(updated))
}

/// Destructive, irreversible: clear every offboard event.
///
/// The summary counter is left untouched.
pub async fn reset_offboard_table(State(state): State<ServerState>) -> AppResult<Json<bool>> {
    let repo = OffboardRepository::new(state.get_db());
    let reset = repo.reset().await?;
    tracing::warn!("Offboard table reset");
    Ok(Json(reset))
}

/// Debug view of the ledger vs. its summary
pub async fn offboard_state(
    State(state): State<ServerState>,
) -> AppResult<Json<OffboardStateResponse>> {
    let repo = OffboardRepository::new(state.get_db());
    let summary = repo.summary().await?;

    Ok(Json(OffboardStateResponse {
        total_offboards: summary.total_offboards,
        actual_events: repo.count_events().await?,
        recent: repo.recent(5).await?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::test_state;
    use shared::Role;

    #[tokio::test]
    async fn approve_then_reapprove_via_handlers() {
        let state = test_state().await;
        let requests = SignupRequestRepository::new(state.get_db());
        let request = requests
            .create("t@example.edu", "password-1", Role::Trainer)
            .await
            .unwrap();
        let id = request.id.unwrap().to_string();

        let info = approve_signup(State(state.clone()), Path(id.clone()))
            .await
            .unwrap();
        assert_eq!(info.0.email, "t@example.edu");

        // A second approval surfaces as a conflict, not a second account
        let err = approve_signup(State(state.clone()), Path(id)).await.err().unwrap();
        assert!(matches!(err, crate::utils::AppError::Conflict(_)));

        let trainers = list_trainers(State(state)).await.unwrap();
        assert_eq!(trainers.0.len(), 1);
    }

    #[tokio::test]
    async fn offboard_state_surfaces_reset_drift() {
        let state = test_state().await;
        let ledger = OffboardRepository::new(state.get_db());
        ledger.record(1_700_000_000_000).await.unwrap();

        reset_offboard_table(State(state.clone())).await.unwrap();

        let view = offboard_state(State(state)).await.unwrap();
        assert_eq!(view.0.total_offboards, 1);
        assert_eq!(view.0.actual_events, 0);
        assert!(view.0.recent.is_empty());
    }
}
