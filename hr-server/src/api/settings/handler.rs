//! Permission settings handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared::AppError;
use shared::client::{
    PermissionsResponse, PermissionsUpdatedResponse, UpdatePermissionsRequest,
    UpdateRolePermissionRequest,
};

use crate::api::bad_json;
use crate::auth::SessionClaim;
use crate::core::ServerState;

/// Current table, for any signed-in user (client cache refresh)
pub async fn get_permissions(
    State(state): State<ServerState>,
    _claim: SessionClaim,
) -> Json<PermissionsResponse> {
    Json(PermissionsResponse {
        permissions: state.permissions.snapshot(),
    })
}

/// Replace the whole table
pub async fn update_permissions(
    State(state): State<ServerState>,
    claim: SessionClaim,
    payload: Result<Json<UpdatePermissionsRequest>, JsonRejection>,
) -> Result<Json<PermissionsUpdatedResponse>, AppError> {
    let Json(req) = payload.map_err(bad_json)?;
    let permissions = state.permissions.set_permissions(req.permissions)?;

    tracing::info!(user_id = %claim.sub, "Permission table replaced");

    Ok(Json(PermissionsUpdatedResponse {
        success: true,
        message: "Permissions updated successfully".to_string(),
        permissions,
    }))
}

/// Set one `(role, module)` cell
pub async fn update_role_permission(
    State(state): State<ServerState>,
    claim: SessionClaim,
    payload: Result<Json<UpdateRolePermissionRequest>, JsonRejection>,
) -> Result<Json<PermissionsUpdatedResponse>, AppError> {
    let Json(req) = payload.map_err(bad_json)?;
    let permissions = state
        .permissions
        .update_role_permission(req.role, req.module, req.allowed)?;

    tracing::info!(
        user_id = %claim.sub,
        role = %req.role,
        module = %req.module,
        allowed = req.allowed,
        "Permission updated"
    );

    Ok(Json(PermissionsUpdatedResponse {
        success: true,
        message: format!(
            "Permission {}.{} set to {}",
            req.role, req.module, req.allowed
        ),
        permissions,
    }))
}

/// Restore the seed table
pub async fn reset_permissions(
    State(state): State<ServerState>,
    claim: SessionClaim,
) -> Result<Json<PermissionsUpdatedResponse>, AppError> {
    let permissions = state.permissions.reset_to_defaults()?;

    tracing::info!(user_id = %claim.sub, "Permission table reset to defaults");

    Ok(Json(PermissionsUpdatedResponse {
        success: true,
        message: "Permissions reset to defaults".to_string(),
        permissions,
    }))
}
