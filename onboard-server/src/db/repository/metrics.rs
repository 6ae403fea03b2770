//! Progress Metrics Repository
//!
//! Derived dashboard metrics over the employee table and the offboard
//! ledger. Every window method takes `now` explicitly so the trailing
//! windows are reproducible under test; a window is `[now - N days, now]`,
//! inclusive on both ends, never aligned to calendar boundaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::curriculum;
use crate::db::models::{Employee, OnboardStatus};
use crate::utils::time;

/// Trailing metric window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Month,
    Semester,
}

impl Period {
    /// Window length in days (trailing, wall-clock)
    pub fn days(&self) -> i64 {
        match self {
            Period::Month => 30,
            Period::Semester => 180,
        }
    }
}

/// One month of the hiring/completion series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub new_hires: i64,
    pub completed: i64,
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct MetricsRepository {
    base: BaseRepository,
}

impl MetricsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// In-progress employees whose start date falls in the window
    pub async fn new_hires_count(&self, period: Period, now: i64) -> RepoResult<i64> {
        let (start, end) = time::trailing_window(period.days(), now);
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT count() FROM employee
                    WHERE start_date >= $start
                    AND start_date <= $end
                    AND status != $completed
                    GROUP ALL"#,
            )
            .bind(("start", start))
            .bind(("end", end))
            .bind(("completed", OnboardStatus::Completed))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Completed employees whose completion date falls in the window
    pub async fn completed_onboardings_count(&self, period: Period, now: i64) -> RepoResult<i64> {
        let (start, end) = time::trailing_window(period.days(), now);
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT count() FROM employee
                    WHERE status = $completed
                    AND completion_date >= $start
                    AND completion_date <= $end
                    GROUP ALL"#,
            )
            .bind(("start", start))
            .bind(("end", end))
            .bind(("completed", OnboardStatus::Completed))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Ledger events dated within the window
    pub async fn offboards_count(&self, period: Period, now: i64) -> RepoResult<i64> {
        let (start, end) = time::trailing_window(period.days(), now);
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT count() FROM offboard_event
                    WHERE date >= $start
                    AND date <= $end
                    GROUP ALL"#,
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Monthly hiring/completion series over the trailing semester.
    ///
    /// Single pass: an employee whose start date is in the window adds one
    /// new-hire count under its start month; an employee whose completion
    /// date is in the window adds one completed count under its completion
    /// month. An employee never contributes twice to the same series.
    /// Sorted ascending by month key; absent counters are reported as 0.
    pub async fn monthly_series(&self, now: i64) -> RepoResult<Vec<MonthlyPoint>> {
        let (start, end) = time::trailing_window(Period::Semester.days(), now);
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM employee
                    WHERE (start_date >= $start AND start_date <= $end)
                    OR (completion_date >= $start AND completion_date <= $end)"#,
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;

        let mut months: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for employee in &employees {
            if employee.start_date >= start && employee.start_date <= end {
                months.entry(time::month_key(employee.start_date)).or_default().0 += 1;
            }
            if let Some(completed_at) = employee.completion_date
                && employee.status == OnboardStatus::Completed
                && completed_at >= start
                && completed_at <= end
            {
                months.entry(time::month_key(completed_at)).or_default().1 += 1;
            }
        }

        Ok(months
            .into_iter()
            .map(|(month, (new_hires, completed))| MonthlyPoint {
                month,
                new_hires,
                completed,
            })
            .collect())
    }
}

/// Fraction of the curriculum the employee has completed, in [0, 1].
///
/// Zero recorded tasks yields 0, never a division error.
pub fn completion_percentage(employee: &Employee) -> f64 {
    curriculum::completion_ratio(&employee.tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::EmployeeCreate;
    use crate::db::repository::test_support::test_db;
    use crate::db::repository::{EmployeeRepository, OffboardRepository};
    use crate::utils::time::{MILLIS_PER_DAY, month_key};

    // Pinned clock: ~2024-10-04, far from any epoch edge
    const NOW: i64 = 20_000 * MILLIS_PER_DAY;

    fn days_ago(n: i64) -> i64 {
        NOW - n * MILLIS_PER_DAY
    }

    async fn seed_employee(
        db: &Surreal<Db>,
        first: &str,
        start_date: i64,
        completion_date: Option<i64>,
    ) {
        let status = if completion_date.is_some() {
            OnboardStatus::Completed
        } else {
            OnboardStatus::InProgress
        };
        db.query(
            r#"CREATE employee SET
                first_name = $first_name,
                last_name = 'Test',
                email = 'seed@example.edu',
                id_number = 'I000',
                date_of_birth = '1999-01-01',
                start_date = $start_date,
                status = $status,
                completion_date = $completion_date,
                tasks = {},
                access_controls = {}"#,
        )
        .bind(("first_name", first.to_string()))
        .bind(("start_date", start_date))
        .bind(("status", status))
        .bind(("completion_date", completion_date))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn new_hires_window_is_inclusive_and_excludes_completed() {
        let db = test_db().await;
        let metrics = MetricsRepository::new(db.clone());

        // Exactly on both window edges
        seed_employee(&db, "EdgeStart", days_ago(30), None).await;
        seed_employee(&db, "EdgeEnd", NOW, None).await;
        // Outside the window
        seed_employee(&db, "TooOld", days_ago(31), None).await;
        // Inside the window but already completed: excluded
        seed_employee(&db, "Done", days_ago(5), Some(days_ago(1))).await;

        assert_eq!(metrics.new_hires_count(Period::Month, NOW).await.unwrap(), 2);
        assert_eq!(
            metrics.new_hires_count(Period::Semester, NOW).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn completed_count_uses_completion_date() {
        let db = test_db().await;
        let metrics = MetricsRepository::new(db.clone());

        // Started long ago, finished recently: counts for the month window
        seed_employee(&db, "Fresh", days_ago(170), Some(days_ago(2))).await;
        // Finished outside the month window
        seed_employee(&db, "Stale", days_ago(170), Some(days_ago(90))).await;
        // Still in progress
        seed_employee(&db, "Active", days_ago(2), None).await;

        assert_eq!(
            metrics
                .completed_onboardings_count(Period::Month, NOW)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            metrics
                .completed_onboardings_count(Period::Semester, NOW)
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn offboard_count_tracks_ledger_and_reset_asymmetry() {
        let db = test_db().await;
        let metrics = MetricsRepository::new(db.clone());
        let ledger = OffboardRepository::new(db);

        ledger.record(days_ago(1)).await.unwrap();
        assert_eq!(metrics.offboards_count(Period::Month, NOW).await.unwrap(), 1);

        ledger.record(days_ago(100)).await.unwrap();
        assert_eq!(metrics.offboards_count(Period::Month, NOW).await.unwrap(), 1);
        assert_eq!(
            metrics.offboards_count(Period::Semester, NOW).await.unwrap(),
            2
        );

        // Reset empties every window, but the summary keeps its total
        ledger.reset().await.unwrap();
        assert_eq!(metrics.offboards_count(Period::Month, NOW).await.unwrap(), 0);
        assert_eq!(
            metrics.offboards_count(Period::Semester, NOW).await.unwrap(),
            0
        );
        assert_eq!(ledger.summary().await.unwrap().total_offboards, 2);
    }

    #[tokio::test]
    async fn monthly_series_splits_start_and_completion_months() {
        let db = test_db().await;
        let metrics = MetricsRepository::new(db.clone());

        // Starts ~five months back, completes ~one month back
        let started = days_ago(150);
        let completed = days_ago(30);
        seed_employee(&db, "Ana", started, Some(completed)).await;

        let series = metrics.monthly_series(NOW).await.unwrap();
        let start_month = month_key(started);
        let completion_month = month_key(completed);
        assert_ne!(start_month, completion_month);

        for point in &series {
            if point.month == start_month {
                assert_eq!((point.new_hires, point.completed), (1, 0));
            } else if point.month == completion_month {
                assert_eq!((point.new_hires, point.completed), (0, 1));
            } else {
                assert_eq!((point.new_hires, point.completed), (0, 0));
            }
        }
        assert!(series.iter().any(|p| p.month == start_month));
        assert!(series.iter().any(|p| p.month == completion_month));

        // Sorted ascending by month key
        let keys: Vec<_> = series.iter().map(|p| p.month.clone()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[tokio::test]
    async fn monthly_series_ignores_activity_outside_the_window() {
        let db = test_db().await;
        let metrics = MetricsRepository::new(db.clone());

        // Started before the semester window, completed inside it: only the
        // completion contributes
        seed_employee(&db, "OldTimer", days_ago(300), Some(days_ago(10))).await;

        let series = metrics.monthly_series(NOW).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month, month_key(days_ago(10)));
        assert_eq!(series[0].new_hires, 0);
        assert_eq!(series[0].completed, 1);
    }

    #[tokio::test]
    async fn onboarding_scenario_end_to_end() {
        // Create Ana Lee starting today, toggle one Day 1 task, check the
        // read-back and the completion percentage bounds
        let db = test_db().await;
        let employees = EmployeeRepository::new(db.clone());

        let ana = employees
            .create(EmployeeCreate {
                first_name: "Ana".to_string(),
                last_name: "Lee".to_string(),
                email: "ana.lee@example.edu".to_string(),
                id_number: "I00099".to_string(),
                date_of_birth: "2000-06-15".to_string(),
                start_date: Some(NOW),
            })
            .await
            .unwrap();
        let id = ana.id.unwrap().to_string();

        employees
            .set_task_status(&id, "Day 1", "FERPA Training", true)
            .await
            .unwrap();

        let read_back = employees.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(read_back.tasks["Day 1"]["FERPA Training"], true);
        // No other Day 1 task was touched
        assert_eq!(read_back.tasks["Day 1"].len(), 1);

        let pct = completion_percentage(&read_back);
        assert!(pct > 0.0 && pct < 1.0);
    }

    #[tokio::test]
    async fn completion_percentage_bounds() {
        let db = test_db().await;
        let employees = EmployeeRepository::new(db);

        let blank = employees
            .create(EmployeeCreate {
                first_name: "Blank".to_string(),
                last_name: "Slate".to_string(),
                email: "blank@example.edu".to_string(),
                id_number: "I001".to_string(),
                date_of_birth: "1998-02-11".to_string(),
                start_date: Some(NOW),
            })
            .await
            .unwrap();

        assert_eq!(completion_percentage(&blank), 0.0);
    }
}
