//! Offboarding API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/offboarding", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/checklist", get(handler::checklist))
        .route("/complete", post(handler::complete))
}
