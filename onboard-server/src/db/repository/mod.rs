//! Repository Module
//!
//! Provides CRUD operations for the store tables.

pub mod employee;
pub mod metrics;
pub mod note;
pub mod offboard;
pub mod signup_request;
pub mod user;
pub mod user_state;

// Re-exports
pub use employee::EmployeeRepository;
pub use metrics::{MetricsRepository, MonthlyPoint, Period};
pub use note::NoteRepository;
pub use offboard::OffboardRepository;
pub use signup_request::SignupRequestRepository;
pub use user::UserRepository;
pub use user_state::UserStateRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use surrealdb::Surreal;
    use surrealdb::engine::local::{Db, Mem};

    /// Fresh in-memory store with the schema applied, one per test
    pub async fn test_db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        crate::db::define_schema(&db).await.unwrap();
        db
    }
}
