//! Employee Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccessControlMap, Employee, EmployeeCreate, OnboardStatus};
use crate::utils::time;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Start tracking a new hire with empty completion maps
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let start_date = data.start_date.unwrap_or_else(time::now_millis);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    id_number = $id_number,
                    date_of_birth = $date_of_birth,
                    start_date = $start_date,
                    status = $status,
                    tasks = {},
                    access_controls = {}
                RETURN AFTER"#,
            )
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("email", data.email))
            .bind(("id_number", data.id_number))
            .bind(("date_of_birth", data.date_of_birth))
            .bind(("start_date", start_date))
            .bind(("status", OnboardStatus::InProgress))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = parse_id(id)?;
        let employee: Option<Employee> = self.base.db().select(thing).await?;
        Ok(employee)
    }

    /// Case-insensitive exact match on both name fields
    pub async fn find_by_name(&self, first: &str, last: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM employee
                    WHERE string::lowercase(first_name) = string::lowercase($first)
                    AND string::lowercase(last_name) = string::lowercase($last)
                    LIMIT 1"#,
            )
            .bind(("first", first.to_string()))
            .bind(("last", last.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Most recent hires by start date
    pub async fn find_recent(&self, limit: i64, exclude_completed: bool) -> RepoResult<Vec<Employee>> {
        let query = if exclude_completed {
            r#"SELECT * FROM employee
                WHERE status != $completed
                ORDER BY start_date DESC
                LIMIT $limit"#
        } else {
            "SELECT * FROM employee ORDER BY start_date DESC LIMIT $limit"
        };

        let mut result = self
            .base
            .db()
            .query(query)
            .bind(("completed", OnboardStatus::Completed))
            .bind(("limit", limit))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees)
    }

    /// Idempotent point write into the nested day/task completion map.
    ///
    /// Keys are not validated against the curriculum: an unknown day or
    /// task is stored as-is, never silently dropped.
    pub async fn set_task_status(
        &self,
        id: &str,
        day: &str,
        task: &str,
        done: bool,
    ) -> RepoResult<Employee> {
        let thing = parse_id(id)?;
        let mut employee: Employee = self
            .base
            .db()
            .select(thing.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        employee
            .tasks
            .entry(day.to_string())
            .or_default()
            .insert(task.to_string(), done);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET tasks = $tasks RETURN AFTER")
            .bind(("thing", thing))
            .bind(("tasks", employee.tasks.clone()))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Full-map replace of the access-control completion state
    pub async fn set_access_controls(
        &self,
        id: &str,
        controls: AccessControlMap,
    ) -> RepoResult<Employee> {
        let thing = parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET access_controls = $controls RETURN AFTER")
            .bind(("thing", thing))
            .bind(("controls", controls))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Flip status to completed and stamp the completion time.
    ///
    /// False when the employee does not exist.
    pub async fn mark_completed(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, completion_date = $completed_at RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", OnboardStatus::Completed))
            .bind(("completed_at", time::now_millis()))
            .await?;

        let updated: Option<Employee> = result.take(0)?;
        Ok(updated.is_some())
    }

    /// Hard delete; false (not an error) when already absent
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id)?;
        let existing: Option<Employee> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Ok(false);
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

fn parse_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}
