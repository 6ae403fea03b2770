//! Server state
//!
//! [`ServerState`] holds the shared service handles: configuration, the
//! store connection, the JWT service and the session tracker. It is
//! constructed once at startup and cloned (all members are cheap handles)
//! into every handler; there is no ambient global.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, SessionTracker};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub sessions: Arc<SessionTracker>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        sessions: Arc<SessionTracker>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            sessions,
        }
    }

    /// Initialize the server state:
    /// 1. ensure the work directory layout exists
    /// 2. open the database at WORK_DIR/database/staffing.db
    /// 3. construct the JWT service and session tracker
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("staffing.db");
        let db_service = DbService::new(&db_path).await?;

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let sessions = Arc::new(SessionTracker::new(config.enforce_session_timeouts));

        Ok(Self::new(config.clone(), db_service.db, jwt_service, sessions))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Log the startup summary
    pub fn log_startup_banner(&self) {
        tracing::info!("Onboarding tracker ready");
        tracing::info!("  Environment : {}", self.config.environment);
        tracing::info!("  HTTP API    : http://localhost:{}", self.config.http_port);
        tracing::info!("  Work dir    : {}", self.config.work_dir);
        tracing::info!(
            "  Session caps: {}",
            if self.config.enforce_session_timeouts {
                "30m idle / 8h absolute"
            } else {
                "token expiry only"
            }
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use surrealdb::engine::local::Mem;

    /// In-memory state for handler-level tests
    pub async fn test_state() -> ServerState {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        crate::db::define_schema(&db).await.unwrap();

        let mut config = Config::with_overrides("/tmp/onboard-test", 0);
        config.it_manager_code = "test-manager-code".to_string();

        ServerState::new(
            config,
            db,
            Arc::new(JwtService::default()),
            Arc::new(SessionTracker::new(false)),
        )
    }
}
