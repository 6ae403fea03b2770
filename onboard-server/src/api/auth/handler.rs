//! Authentication Handlers
//!
//! Login, signup, logout, and per-user UI state.

use std::time::Duration;

use axum::{Json, extract::State};
use shared::Role;
use shared::client::{
    CurrentUserResponse, LoginRequest, LoginResponse, SignupForm, SignupResponse, UserInfo,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate};
use crate::db::repository::{SignupRequestRepository, UserRepository, UserStateRepository};
use crate::utils::{AppError, AppResult, time};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        email: user.email.clone(),
        role: user.role,
        created_at: user.created_at,
    }
}

/// Login handler
///
/// Verifies credentials and returns a bearer token. Unknown email and
/// wrong password produce the same response, after the same fixed delay.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let users = UserRepository::new(state.get_db());
    let verified = users.verify(&req.email, &req.password).await?;

    // Fixed delay before acting on the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(user) = verified else {
        tracing::warn!(target: "security", email = %req.email, "Login failed");
        return Err(AppError::invalid_credentials());
    };

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    let info = user_info(&user);
    state.sessions.begin(&info.id, time::now_millis());

    tracing::info!(user_id = %info.id, email = %user.email, role = %user.role, "User logged in");

    Ok(Json(LoginResponse { token, user: info }))
}

/// Signup handler
///
/// IT Manager signups must present the shared manager code and create the
/// account directly; Trainer signups queue a request for approval.
pub async fn signup(
    State(state): State<ServerState>,
    Json(form): Json<SignupForm>,
) -> AppResult<Json<SignupResponse>> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    if form.password != form.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }

    match form.role {
        Role::ItManager => {
            let code = form.manager_code.as_deref().unwrap_or_default();
            if code != state.config.it_manager_code {
                tracing::warn!(target: "security", email = %form.email, "Invalid IT Manager code");
                return Err(AppError::forbidden("Invalid IT Manager code"));
            }

            let users = UserRepository::new(state.get_db());
            let user = users
                .create(UserCreate {
                    email: form.email,
                    password: form.password,
                    role: Role::ItManager,
                })
                .await?;

            tracing::info!(email = %user.email, "IT Manager account created");
            Ok(Json(SignupResponse {
                outcome: "created".to_string(),
                message: "Account created successfully. You can now log in.".to_string(),
            }))
        }
        Role::Trainer => {
            let requests = SignupRequestRepository::new(state.get_db());
            let request = requests
                .create(&form.email, &form.password, Role::Trainer)
                .await?;

            tracing::info!(email = %request.email, "Signup request queued");
            Ok(Json(SignupResponse {
                outcome: "pending".to_string(),
                message: "Sign-up request submitted. Please wait for IT Manager approval."
                    .to_string(),
            }))
        }
    }
}

/// Current user info
pub async fn me(user: CurrentUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// Logout: drop the tracked session
pub async fn logout(State(state): State<ServerState>, user: CurrentUser) -> Json<bool> {
    state.sessions.end(&user.id);
    tracing::info!(user_id = %user.id, "User logged out");
    Json(true)
}

/// Fetch the caller's persisted UI state
pub async fn get_state(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let repo = UserStateRepository::new(state.get_db());
    let value = repo.get(&user.email).await?;
    Ok(Json(value.unwrap_or(serde_json::Value::Null)))
}

/// Persist the caller's UI state (last write wins)
pub async fn save_state(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(value): Json<serde_json::Value>,
) -> AppResult<Json<bool>> {
    let repo = UserStateRepository::new(state.get_db());
    repo.save(&user.email, value).await?;
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::test_state;

    fn signup_form(role: Role, code: Option<&str>) -> SignupForm {
        SignupForm {
            email: "new@example.edu".to_string(),
            password: "pass-word-123".to_string(),
            confirm_password: "pass-word-123".to_string(),
            role,
            manager_code: code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn manager_signup_requires_the_shared_code() {
        let state = test_state().await;

        let err = signup(
            State(state.clone()),
            Json(signup_form(Role::ItManager, Some("wrong"))),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Forbidden(_)));

        let response = signup(
            State(state.clone()),
            Json(signup_form(Role::ItManager, Some("test-manager-code"))),
        )
        .await
        .unwrap();
        assert_eq!(response.0.outcome, "created");

        let users = UserRepository::new(state.get_db());
        let user = users.find_by_email("new@example.edu").await.unwrap().unwrap();
        assert_eq!(user.role, Role::ItManager);
    }

    #[tokio::test]
    async fn trainer_signup_queues_a_pending_request() {
        let state = test_state().await;

        let response = signup(State(state.clone()), Json(signup_form(Role::Trainer, None)))
            .await
            .unwrap();
        assert_eq!(response.0.outcome, "pending");

        // No account exists until an IT Manager approves
        let users = UserRepository::new(state.get_db());
        assert!(users.find_by_email("new@example.edu").await.unwrap().is_none());

        let requests = SignupRequestRepository::new(state.get_db());
        assert_eq!(requests.find_pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_a_validation_error() {
        let state = test_state().await;
        let mut form = signup_form(Role::Trainer, None);
        form.confirm_password = "different".to_string();

        let err = signup(State(state), Json(form)).await.err().unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn login_failures_share_one_error_shape() {
        let state = test_state().await;
        let users = UserRepository::new(state.get_db());
        users
            .create(UserCreate {
                email: "known@example.edu".to_string(),
                password: "correct-horse".to_string(),
                role: Role::Trainer,
            })
            .await
            .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "known@example.edu".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .err()
        .unwrap();

        let unknown_email = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ghost@example.edu".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_returns_a_validating_token() {
        let state = test_state().await;
        let users = UserRepository::new(state.get_db());
        users
            .create(UserCreate {
                email: "ana@example.edu".to_string(),
                password: "correct-horse".to_string(),
                role: Role::ItManager,
            })
            .await
            .unwrap();

        let response = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ana@example.edu".to_string(),
                password: "correct-horse".to_string(),
            }),
        )
        .await
        .unwrap();

        let claims = state.jwt_service.validate_token(&response.0.token).unwrap();
        assert_eq!(claims.email, "ana@example.edu");
        assert!(claims.role.is_admin());
    }
}
