//! Dashboard API Handlers
//!
//! The six metric tiles plus the monthly hiring/completion series, all
//! derived from the employee table and the offboard ledger at request
//! time.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{MetricsRepository, MonthlyPoint, Period};
use crate::utils::{AppResult, time};

/// Full dashboard payload
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub new_hires_month: i64,
    pub new_hires_semester: i64,
    pub offboards_month: i64,
    pub offboards_semester: i64,
    pub completed_month: i64,
    pub completed_semester: i64,
    pub monthly_series: Vec<MonthlyPoint>,
}

/// GET /api/dashboard
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardResponse>> {
    let metrics = MetricsRepository::new(state.get_db());
    let now = time::now_millis();

    let response = DashboardResponse {
        new_hires_month: metrics.new_hires_count(Period::Month, now).await?,
        new_hires_semester: metrics.new_hires_count(Period::Semester, now).await?,
        offboards_month: metrics.offboards_count(Period::Month, now).await?,
        offboards_semester: metrics.offboards_count(Period::Semester, now).await?,
        completed_month: metrics.completed_onboardings_count(Period::Month, now).await?,
        completed_semester: metrics
            .completed_onboardings_count(Period::Semester, now)
            .await?,
        monthly_series: metrics.monthly_series(now).await?,
    };

    Ok(Json(response))
}
