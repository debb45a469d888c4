use std::sync::Arc;

use crate::auth::{JwtService, PermissionStore};
use crate::core::{Config, Result, ServerError};
use crate::users::UserDirectory;

/// Shared server state
///
/// Cloned into every handler; all services sit behind `Arc`.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Configuration (immutable) |
/// | jwt_service | Session token issuer/verifier |
/// | permissions | Authoritative role → module table |
/// | users | Accounts that can sign in |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub jwt_service: Arc<JwtService>,
    pub permissions: Arc<PermissionStore>,
    pub users: Arc<UserDirectory>,
}

impl ServerState {
    /// Build the state from its parts
    ///
    /// The permission store is loaded from the snapshot in `config.work_dir`.
    pub fn new(config: Config, users: UserDirectory) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let permissions = Arc::new(PermissionStore::load(config.permissions_path()));

        Self {
            config,
            jwt_service,
            permissions,
            users: Arc::new(users),
        }
    }

    /// Build the state, loading users as configured
    ///
    /// `USERS_FILE` wins over `SEED_PASSWORD`. Demo accounts are never
    /// seeded in production.
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let users = match (&config.users_file, &config.seed_password) {
            (Some(path), _) => {
                let users = UserDirectory::from_file(path)?;
                tracing::info!(count = users.len(), path = %path, "Loaded user directory");
                users
            }
            (None, Some(_)) if config.is_production() => {
                return Err(ServerError::Config(
                    "SEED_PASSWORD is not allowed in production, set USERS_FILE".into(),
                ));
            }
            (None, Some(password)) => {
                tracing::warn!("Seeding demo accounts (admin, hr, payroll, employee @hr.local)");
                UserDirectory::demo(password)?
            }
            (None, None) => {
                tracing::warn!("No USERS_FILE or SEED_PASSWORD set, nobody can sign in");
                UserDirectory::default()
            }
        };

        Ok(Self::new(config.clone(), users))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password;
    use crate::users::UserRecord;
    use shared::Role;

    fn config(dir: &tempfile::TempDir, environment: &str) -> Config {
        let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.environment = environment.to_string();
        config
    }

    fn write_users_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("users.json");
        let records = vec![UserRecord {
            id: "u-ops".to_string(),
            email: "ops@corp.test".to_string(),
            name: "Ops".to_string(),
            role: Role::Admin,
            avatar: None,
            password_hash: password::hash_password("ops-pass").unwrap(),
            is_active: true,
        }];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_seed_password_refused_in_production() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&dir, "production");
        config.seed_password = Some("demo".to_string());

        assert!(matches!(
            ServerState::initialize(&config),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_users_file_wins_over_seed_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&dir, "production");
        config.users_file = Some(write_users_file(&dir));
        config.seed_password = Some("demo".to_string());

        let state = ServerState::initialize(&config).unwrap();
        assert_eq!(state.users.len(), 1);
        assert!(state.users.find_by_email("ops@corp.test").is_some());
        assert!(state.users.find_by_email("admin@hr.local").is_none());
    }

    #[test]
    fn test_seed_password_outside_production() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&dir, "staging");
        config.seed_password = Some("demo".to_string());

        let state = ServerState::initialize(&config).unwrap();
        assert_eq!(state.users.len(), Role::ALL.len());
        assert!(state.users.authenticate("hr@hr.local", "demo").is_ok());
    }

    #[test]
    fn test_no_user_source_gives_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let state = ServerState::initialize(&config(&dir, "development")).unwrap();
        assert!(state.users.is_empty());
    }
}
