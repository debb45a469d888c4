//! Authentication and authorization
//!
//! - [`JwtService`] - session token service
//! - [`SessionClaim`] - identity carried by the token
//! - [`PermissionStore`] - authoritative role → module table
//! - [`require_auth`] / [`require_admin`] - API middleware
//! - [`edge_redirect`] - page-level cookie presence check

pub mod cookie;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{JwtConfig, JwtError, JwtService, SessionClaim};
pub use middleware::{edge_redirect, require_admin, require_auth};
pub use permissions::PermissionStore;

use shared::AppError;

impl From<JwtError> for AppError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => {
                AppError::internal(format!("Failed to generate token: {}", msg))
            }
            _ => AppError::invalid_token("Invalid token"),
        }
    }
}
