//! Authentication Handlers
//!
//! Login sets the `auth-token` cookie, logout clears it, `me` resolves the
//! session to a fresh user record.

use std::time::Duration;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use http::header;
use shared::client::{LoginRequest, LoginResponse, MeResponse, SuccessResponse};
use shared::{AppError, ErrorCode};

use crate::api::bad_json;
use crate::auth::{SessionClaim, cookie};
use crate::core::ServerState;
use crate::security_log;
use crate::users::LoginFailure;

/// Login handler
///
/// Checks the credentials and answers with the user and its dashboard. The
/// token only travels in the `Set-Cookie` header.
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload.map_err(bad_json)?;

    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Email and password are required",
        ));
    }

    // Same delay for every outcome
    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    let user = match state.users.authenticate(&req.email, &req.password) {
        Ok(user) => user,
        Err(LoginFailure::InvalidCredentials) => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(AppError::invalid_credentials());
        }
        Err(LoginFailure::Disabled) => {
            security_log!("WARN", "login_disabled", email = req.email.clone());
            return Err(AppError::with_message(
                ErrorCode::AccountDisabled,
                "Account has been disabled",
            ));
        }
    };

    let jwt_service = state.get_jwt_service();
    let claim = SessionClaim {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
    };
    let token = jwt_service.issue(&claim)?;

    let set_cookie = cookie::session_cookie(
        &token,
        jwt_service.ttl_seconds(),
        state.config.is_production(),
    )
    .ok_or_else(|| AppError::internal("Failed to build session cookie"))?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User logged in"
    );

    let response = LoginResponse {
        user: user.info(),
        redirect_to: user.role.descriptor().dashboard_path.to_string(),
    };

    Ok(([(header::SET_COOKIE, set_cookie)], Json(response)).into_response())
}

/// Logout handler
///
/// Tokens are stateless, so logging out only drops the cookie.
pub async fn logout(
    State(state): State<ServerState>,
    claim: Result<SessionClaim, AppError>,
) -> Response {
    if let Ok(claim) = claim {
        tracing::info!(user_id = %claim.sub, email = %claim.email, "User logged out");
    }

    (
        [(
            header::SET_COOKIE,
            cookie::clear_session_cookie(state.config.is_production()),
        )],
        Json(SuccessResponse { success: true }),
    )
        .into_response()
}

/// Current user
///
/// The account is looked up again so a removed or disabled user loses access
/// before the token expires.
pub async fn me(
    State(state): State<ServerState>,
    claim: SessionClaim,
) -> Result<Json<MeResponse>, AppError> {
    let user = state
        .users
        .find_by_id(&claim.sub)
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            security_log!("WARN", "session_user_gone", user_id = claim.sub.clone());
            AppError::unauthorized()
        })?;

    Ok(Json(MeResponse { user: user.info() }))
}
