//! Notes API Handlers
//!
//! Shared team notes. Every authenticated user can edit or delete every
//! note; the author field records who wrote it, nothing more.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Note, NoteCreate, NoteUpdate};
use crate::db::repository::NoteRepository;
use crate::utils::AppResult;

/// List all notes, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Note>>> {
    let repo = NoteRepository::new(state.get_db());
    let notes = repo.find_all().await?;
    Ok(Json(notes))
}

/// Create a note authored by the caller's role
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<NoteCreate>,
) -> AppResult<Json<Note>> {
    let repo = NoteRepository::new(state.get_db());
    let note = repo.create(user.role.as_str(), payload).await?;
    Ok(Json(note))
}

/// Update any note
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<NoteUpdate>,
) -> AppResult<Json<Note>> {
    let repo = NoteRepository::new(state.get_db());
    let note = repo.update(&id, payload).await?;
    Ok(Json(note))
}

/// Delete any note
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = NoteRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
