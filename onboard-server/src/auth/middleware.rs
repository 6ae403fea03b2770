//! Authentication middleware
//!
//! Axum middleware enforcing the session/role gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService, SessionCheck};
use crate::core::ServerState;
use crate::utils::{AppError, time};

/// Routes reachable without a token
fn is_public_api_route(path: &str) -> bool {
    matches!(path, "/api/auth/login" | "/api/auth/signup" | "/api/health")
}

/// Authentication middleware - requires a logged-in caller.
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// applies the optional session activity policy, then injects
/// [`CurrentUser`] into the request extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight never authenticates
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own 404 handling
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })?;

    let user = CurrentUser::from(claims);

    // Idle/absolute windows force a fresh login before anything else runs
    if state.sessions.touch(&user.id, time::now_millis()) == SessionCheck::Expired {
        tracing::warn!(target: "security", user_id = %user.id, "Session window elapsed");
        return Err(AppError::SessionExpired);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Authorization middleware - requires the IT Manager role.
///
/// Must run after [`require_auth`] so the caller context is present.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.role.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            email = %user.email,
            "Admin-only operation denied"
        );
        return Err(AppError::forbidden(
            "This operation requires the IT Manager role",
        ));
    }

    Ok(next.run(req).await)
}
