//! API routing
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login, signup, session state
//! - [`hires`] - new-hire records, checklists, task toggles
//! - [`dashboard`] - derived metrics
//! - [`offboarding`] - offboarding checklist and completion
//! - [`notes`] - shared notes
//! - [`admin`] - IT Manager operations

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod hires;
pub mod notes;
pub mod offboarding;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(hires::router())
        .merge(dashboard::router())
        .merge(offboarding::router())
        .merge(notes::router())
        .merge(admin::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
