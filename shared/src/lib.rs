//! Shared types for the onboarding tracker
//!
//! Common types used across server and client crates: API request/response
//! DTOs and the role model.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::Role;
