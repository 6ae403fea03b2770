//! Database models matching the store schema

pub mod employee;
pub mod note;
pub mod offboard;
pub mod serde_helpers;
pub mod signup_request;
pub mod user;
pub mod user_state;

pub use employee::{AccessControlMap, Employee, EmployeeCreate, EmployeeId, OnboardStatus, TaskMap};
pub use note::{Note, NoteCreate, NoteId, NoteUpdate};
pub use offboard::{OffboardEvent, OffboardSummary};
pub use signup_request::{SignupRequest, SignupRequestId, SignupStatus};
pub use user::{User, UserCreate, UserId};
pub use user_state::UserState;
