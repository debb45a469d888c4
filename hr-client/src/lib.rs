//! HR Client - HTTP client and local permission cache for the HR server
//!
//! - [`HttpClient`] - session-cookie based API client
//! - [`LocalStorage`] - file-backed key/value store
//! - [`PermissionCache`] - persisted copy of the permission table
//! - [`ModuleGuard`] - component-level guard on the cached table

pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod permissions;
pub mod storage;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{ModuleGuard, visible_modules};
pub use http::HttpClient;
pub use permissions::PermissionCache;
pub use storage::LocalStorage;

// Re-export shared types for convenience
pub use shared::client::LoginResponse;
pub use shared::{GuardOutcome, Module, PermissionTable, Role, UserInfo};
