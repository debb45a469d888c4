//! User Model

use serde::{Deserialize, Serialize};

use super::Role;

/// Public view of a user, as returned by `/api/auth/me` and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
}
