//! HR portal server
//!
//! Session tokens, the role → module permission table and the page/API
//! guards of the HR portal.
//!
//! ```text
//! hr-server/src/
//! ├── core/     # config, state, errors, server
//! ├── auth/     # JWT, cookies, passwords, permission store, middleware
//! ├── users/    # user directory
//! ├── api/      # HTTP routes and handlers
//! └── utils/    # logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod users;
pub mod utils;

pub use api::build_app;
pub use auth::{JwtService, PermissionStore, SessionClaim};
pub use core::{Config, Server, ServerError, ServerState};
pub use users::{UserDirectory, UserRecord};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security event logging, target "security"
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
pub fn setup_environment() {
    let dotenv = dotenvy::dotenv();
    init_logger_with_file(std::env::var("LOG_DIR").ok().as_deref());
    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded .env");
    }
}
