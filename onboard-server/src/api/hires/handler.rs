//! New-hire API Handlers
//!
//! Onboarding form submission, checklist reads and toggles, recent-hire
//! listing, and the remove / mark-completed actions.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::curriculum;
use crate::db::models::{AccessControlMap, Employee, EmployeeCreate};
use crate::db::repository::{EmployeeRepository, metrics};
use crate::utils::{AppError, AppResult, time};

/// Onboarding curriculum day
#[derive(Debug, Clone, Serialize)]
pub struct CurriculumDay {
    pub day: &'static str,
    pub tasks: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Completed hires are hidden unless explicitly requested
    #[serde(default)]
    pub include_completed: bool,
}

fn default_limit() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub first: String,
    pub last: String,
}

/// Point toggle into the day/task completion map
#[derive(Debug, Deserialize)]
pub struct TaskToggle {
    pub day: String,
    pub task: String,
    pub done: bool,
}

/// Per-employee curriculum progress
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// In [0, 1]
    pub ratio: f64,
}

/// Submit the new-hire form
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.id_number.trim().is_empty()
    {
        return Err(AppError::validation("Please fill in all fields"));
    }
    if time::parse_date(&payload.date_of_birth).is_none() {
        return Err(AppError::validation(
            "Date of birth must be a YYYY-MM-DD date",
        ));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.create(payload).await?;

    tracing::info!(
        first_name = %employee.first_name,
        last_name = %employee.last_name,
        "New hire added"
    );
    Ok(Json(employee))
}

/// Recent hires by start date
pub async fn recent(
    State(state): State<ServerState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let hires = repo
        .find_recent(query.limit, !query.include_completed)
        .await?;
    Ok(Json(hires))
}

/// Case-insensitive exact-name search
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Employee>> {
    if query.first.trim().is_empty() || query.last.trim().is_empty() {
        return Err(AppError::validation(
            "Please enter both first and last name",
        ));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_name(&query.first, &query.last)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    Ok(Json(employee))
}

/// The static training-day table
pub async fn curriculum() -> Json<Vec<CurriculumDay>> {
    Json(
        curriculum::training_days()
            .iter()
            .map(|&(day, tasks)| CurriculumDay { day, tasks })
            .collect(),
    )
}

/// The onboarding access-control checklist
pub async fn access_controls() -> Json<Vec<curriculum::AccessControlItem>> {
    Json(curriculum::onboarding_access_controls().to_vec())
}

/// Employee with full completion state
pub async fn get_tasks(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Toggle a single day/task checkbox
pub async fn set_task_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(toggle): Json<TaskToggle>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .set_task_status(&id, &toggle.day, &toggle.task, toggle.done)
        .await?;
    Ok(Json(employee))
}

/// Replace the access-control completion map
pub async fn set_access_controls(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(controls): Json<AccessControlMap>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.set_access_controls(&id, controls).await?;
    Ok(Json(employee))
}

/// Curriculum progress for one employee
pub async fn progress(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProgressResponse>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;

    let total_tasks = curriculum::total_task_count();
    let ratio = metrics::completion_percentage(&employee);
    let completed_tasks = (ratio * total_tasks as f64).round() as usize;

    Ok(Json(ProgressResponse {
        completed_tasks,
        total_tasks,
        ratio,
    }))
}

/// Graduate the hire: status flip plus completion timestamp
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.get_db());
    let updated = repo.mark_completed(&id).await?;
    if updated {
        tracing::info!(employee_id = %id, "Onboarding marked completed");
    }
    Ok(Json(updated))
}

/// Remove an abandoned onboarding record
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.get_db());
    let removed = repo.delete(&id).await?;
    if removed {
        tracing::info!(employee_id = %id, "Hire removed");
    }
    Ok(Json(removed))
}
