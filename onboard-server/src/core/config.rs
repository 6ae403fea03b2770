//! Server configuration
//!
//! Every setting can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/onboard | Work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | IT_MANAGER_CODE | (dev default) | Shared secret gating IT Manager self-signup |
//! | ENFORCE_SESSION_TIMEOUTS | false | Enable idle/absolute session windows |
//! | ENVIRONMENT | development | development / staging / production |
//! | JWT_SECRET, JWT_EXPIRATION_MINUTES, JWT_ISSUER | see auth | Token settings |

use std::path::PathBuf;

use crate::auth::JwtConfig;

const DEV_MANAGER_CODE: &str = "dev-manager-code";

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Shared secret entered when an IT Manager self-registers
    pub it_manager_code: String,
    /// Enable the 30-minute idle / 8-hour absolute session windows
    pub enforce_session_timeouts: bool,
    /// development | staging | production
    pub environment: String,
    /// JWT settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let it_manager_code = std::env::var("IT_MANAGER_CODE").unwrap_or_else(|_| {
            if environment == "production" {
                tracing::warn!("IT_MANAGER_CODE not set; privileged self-signup uses the dev default");
            }
            DEV_MANAGER_CODE.into()
        });

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/onboard".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            it_manager_code,
            enforce_session_timeouts: std::env::var("ENFORCE_SESSION_TIMEOUTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment,
            jwt: JwtConfig::default(),
        }
    }

    /// Override the filesystem/port settings, e.g. for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
