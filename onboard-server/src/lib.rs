//! Onboard Server - employee onboarding/offboarding tracker
//!
//! # Architecture
//!
//! - **db**: embedded SurrealDB store, models and repositories
//! - **curriculum**: static training-day and access-control tables
//! - **auth**: argon2 + JWT authentication, role gate, session policy
//! - **api**: HTTP routes and handlers
//! - **core**: configuration, shared state, server bootstrap
//!
//! # Module structure
//!
//! ```text
//! onboard-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, middleware, session tracker
//! ├── curriculum/    # static checklist catalog
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # store, models, repositories
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod curriculum;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
