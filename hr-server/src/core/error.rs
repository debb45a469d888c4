use thiserror::Error;

use crate::auth::JwtError;

/// Startup and runtime errors of the server process
///
/// Request handlers return [`shared::AppError`]; this type covers what
/// happens around them (configuration, binding, serving).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("jwt setup failed: {0}")]
    Jwt(#[from] JwtError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server setup code
pub type Result<T> = std::result::Result<T, ServerError>;
