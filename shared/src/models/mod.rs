//! Data models
//!
//! Shared between hr-server and hr-client (via API).

pub mod module;
pub mod permission_table;
pub mod role;
pub mod user;

// Re-exports
pub use module::*;
pub use permission_table::*;
pub use role::*;
pub use user::*;
