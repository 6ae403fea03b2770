//! Admin API Module
//!
//! Every route here is admin-only: the whole subtree is layered with
//! [`require_admin`] on top of the global authentication middleware.

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signup-requests", get(handler::pending_signup_requests))
        .route("/signup-requests/{id}/approve", post(handler::approve_signup))
        .route("/signup-requests/{id}/deny", post(handler::deny_signup))
        .route("/trainers", get(handler::list_trainers))
        .route("/trainers/{id}", axum::routing::delete(handler::delete_trainer))
        .route("/users/role", axum::routing::put(handler::update_role))
        .route("/offboard-table/reset", post(handler::reset_offboard_table))
        .route("/offboard-state", get(handler::offboard_state))
        .layer(middleware::from_fn(require_admin))
}
