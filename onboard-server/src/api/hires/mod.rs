//! New-hire API Module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/hires", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/recent", get(handler::recent))
        .route("/search", get(handler::search))
        .route("/curriculum", get(handler::curriculum))
        .route("/access-controls", get(handler::access_controls))
        .route(
            "/{id}/tasks",
            get(handler::get_tasks).put(handler::set_task_status),
        )
        .route("/{id}/access-controls", put(handler::set_access_controls))
        .route("/{id}/progress", get(handler::progress))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}", axum::routing::delete(handler::remove))
}
