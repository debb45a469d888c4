//! Client-related types shared between server and client
//!
//! Request/response bodies of the HTTP API. These types are shared between
//! hr-server and hr-client.

use serde::{Deserialize, Serialize};

use crate::models::{Module, PermissionTable, Role, UserInfo};

/// Name of the session cookie carrying the signed token
pub const SESSION_COOKIE: &str = "auth-token";

/// Local storage key of the persisted permission table
pub const PERMISSIONS_STORAGE_KEY: &str = "permissions-storage";

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response (the token itself travels in the session cookie)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserInfo,
    /// Role dashboard to open after login
    pub redirect_to: String,
}

/// `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserInfo,
}

/// Generic `{success}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// =============================================================================
// Permission settings DTOs
// =============================================================================

/// `GET /api/settings/permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsResponse {
    pub permissions: PermissionTable,
}

/// `POST /api/settings/permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePermissionsRequest {
    pub permissions: PermissionTable,
}

/// `PATCH /api/settings/permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRolePermissionRequest {
    pub role: Role,
    pub module: Module,
    pub allowed: bool,
}

/// Response of every permission mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub permissions: PermissionTable,
}
