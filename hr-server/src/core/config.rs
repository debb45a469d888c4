use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::Result;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | WORK_DIR | ./data | Directory of the permission snapshot |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated outside production | HS256 secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 10080 | Session lifetime, 1 to 525600 |
/// | JWT_ISSUER | hr-server | `iss` claim |
/// | JWT_AUDIENCE | hr-web | `aud` claim |
/// | USERS_FILE | - | JSON array of user records |
/// | SEED_PASSWORD | - | Outside production, seed one demo account per role |
/// | LOGIN_DELAY_MS | 500 | Fixed delay before answering a login |
/// | LOG_DIR | - | Also write daily-rolling log files here |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/hr HTTP_PORT=8080 SEED_PASSWORD=demo cargo run -p hr-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory (permission snapshot)
    pub work_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    pub users_file: Option<String>,
    pub seed_password: Option<String>,
    pub login_delay_ms: u64,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "production")?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt,
            environment,
            users_file: non_empty_var("USERS_FILE"),
            seed_password: non_empty_var("SEED_PASSWORD"),
            login_delay_ms: std::env::var("LOGIN_DELAY_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(500),
            log_dir: non_empty_var("LOG_DIR"),
        })
    }

    /// Development defaults with a random JWT secret, without reading the
    /// environment
    ///
    /// Mostly used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            jwt: JwtConfig::ephemeral(),
            environment: "development".into(),
            users_file: None,
            seed_password: None,
            login_delay_ms: 500,
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Path of the permission snapshot
    pub fn permissions_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(crate::auth::permissions::SNAPSHOT_FILE)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
