//! User directory
//!
//! Read-only set of accounts that can sign in. Loaded from a JSON file
//! (`USERS_FILE`) or, in development, seeded with one demo account per role.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use shared::{Role, UserInfo};

use crate::auth::password;
use crate::core::ServerError;

/// Stored account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl UserRecord {
    /// Public view, without the hash
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            avatar: self.avatar.clone(),
        }
    }

    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        password::verify_password(password, &self.password_hash)
    }
}

/// Why a sign-in attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    /// Unknown email or wrong password
    InvalidCredentials,
    /// Right password, disabled account
    Disabled,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    /// Keyed by normalized email
    users: HashMap<String, UserRecord>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Hash checked when the email is unknown, so misses cost one Argon2 run too
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn burn_password_check(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| password::hash_password("no-such-user").ok());
    if let Some(hash) = dummy {
        let _ = password::verify_password(password, hash);
    }
}

impl UserDirectory {
    pub fn new(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|u| (normalize_email(&u.email), u))
            .collect();
        Self { users }
    }

    /// Load a JSON array of [`UserRecord`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read users file {}: {}", path.display(), e))
        })?;
        let records: Vec<UserRecord> = serde_json::from_str(&raw).map_err(|e| {
            ServerError::Config(format!("invalid users file {}: {}", path.display(), e))
        })?;

        for record in &records {
            argon2::password_hash::PasswordHash::new(&record.password_hash).map_err(|e| {
                ServerError::Config(format!(
                    "user {} has an invalid password hash: {}",
                    record.email, e
                ))
            })?;
        }

        Ok(Self::new(records))
    }

    /// One active demo account per role, all sharing `password`
    ///
    /// Emails are `admin@hr.local`, `hr@hr.local`, `payroll@hr.local` and
    /// `employee@hr.local`.
    pub fn demo(password: &str) -> Result<Self, ServerError> {
        let accounts = [
            ("u-admin", "admin@hr.local", "Alex Admin", Role::Admin),
            ("u-hr", "hr@hr.local", "Harper Reyes", Role::Hr),
            ("u-payroll", "payroll@hr.local", "Pat Rollins", Role::Payroll),
            ("u-employee", "employee@hr.local", "Emery Lee", Role::Employee),
        ];

        let mut records = Vec::with_capacity(accounts.len());
        for (id, email, name, role) in accounts {
            let password_hash = password::hash_password(password)
                .map_err(|e| ServerError::Config(format!("failed to hash demo password: {}", e)))?;
            records.push(UserRecord {
                id: id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                role,
                avatar: None,
                password_hash,
                is_active: true,
            });
        }

        Ok(Self::new(records))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(&normalize_email(email))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.users.values().find(|u| u.id == id)
    }

    /// Check credentials
    ///
    /// The password is verified before the active flag, so a disabled
    /// account is only revealed to someone holding its password. Unknown
    /// emails still run one verification against a dummy hash.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&UserRecord, LoginFailure> {
        let Some(user) = self.find_by_email(email) else {
            burn_password_check(password);
            return Err(LoginFailure::InvalidCredentials);
        };

        match user.verify_password(password) {
            Ok(true) => {}
            Ok(false) => return Err(LoginFailure::InvalidCredentials),
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(LoginFailure::InvalidCredentials);
            }
        }

        if !user.is_active {
            return Err(LoginFailure::Disabled);
        }

        Ok(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, password: &str, active: bool) -> UserRecord {
        UserRecord {
            id: format!("id-{}", email),
            email: email.to_string(),
            name: "Test".to_string(),
            role: Role::Employee,
            avatar: None,
            password_hash: password::hash_password(password).unwrap(),
            is_active: active,
        }
    }

    #[test]
    fn test_authenticate() {
        let dir = UserDirectory::new([
            record("a@x.io", "pw-a", true),
            record("b@x.io", "pw-b", false),
        ]);

        assert_eq!(dir.authenticate("a@x.io", "pw-a").unwrap().email, "a@x.io");
        assert_eq!(
            dir.authenticate(" A@X.io ", "pw-a").unwrap().email,
            "a@x.io"
        );
        assert_eq!(
            dir.authenticate("a@x.io", "nope").unwrap_err(),
            LoginFailure::InvalidCredentials
        );
        assert_eq!(
            dir.authenticate("ghost@x.io", "pw-a").unwrap_err(),
            LoginFailure::InvalidCredentials
        );
        assert_eq!(
            dir.authenticate("b@x.io", "pw-b").unwrap_err(),
            LoginFailure::Disabled
        );
        assert_eq!(
            dir.authenticate("b@x.io", "wrong").unwrap_err(),
            LoginFailure::InvalidCredentials
        );
    }

    #[test]
    fn test_unknown_email_runs_a_password_check() {
        let dir = UserDirectory::new([record("a@x.io", "pw-a", true)]);

        assert_eq!(
            dir.authenticate("ghost@x.io", "no-such-user").unwrap_err(),
            LoginFailure::InvalidCredentials
        );
        let dummy = DUMMY_HASH.get().unwrap().as_deref().unwrap();
        assert!(dummy.starts_with("$argon2"));
        assert!(password::verify_password("no-such-user", dummy).unwrap());
    }

    #[test]
    fn test_demo_has_one_account_per_role() {
        let dir = UserDirectory::demo("demo-pass").unwrap();
        assert_eq!(dir.len(), Role::ALL.len());
        for role in Role::ALL {
            let email = format!("{}@hr.local", role.as_str().to_ascii_lowercase());
            let user = dir.authenticate(&email, "demo-pass").unwrap();
            assert_eq!(user.role, role);
        }
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("users.json");
        let records = vec![record("c@x.io", "pw-c", true)];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let dir = UserDirectory::from_file(&path).unwrap();
        assert!(dir.authenticate("c@x.io", "pw-c").is_ok());
        assert!(dir.find_by_id("id-c@x.io").is_some());
    }

    #[test]
    fn test_from_file_rejects_plaintext_passwords() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("users.json");
        std::fs::write(
            &path,
            r#"[{"id":"1","email":"p@x.io","name":"P","role":"HR","password_hash":"hunter2"}]"#,
        )
        .unwrap();

        assert!(matches!(
            UserDirectory::from_file(&path),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_info_has_no_hash() {
        let r = record("d@x.io", "pw", true);
        let json = serde_json::to_value(r.info()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "EMPLOYEE");
    }
}
