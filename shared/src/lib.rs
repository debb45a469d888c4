//! Shared types for the HR portal
//!
//! Types used by both the server and the client: roles, modules, the
//! permission table, the guard decision, API bodies and the error system.

pub mod client;
pub mod error;
pub mod guard;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use guard::{GuardOutcome, authorize};
pub use models::{Module, PermissionTable, Role, RoleDescriptor, UserInfo};
