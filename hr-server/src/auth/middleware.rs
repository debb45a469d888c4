//! Authentication middleware
//!
//! Two layers guard the portal:
//!
//! - [`edge_redirect`] runs on page routes and only checks that a session
//!   cookie is present, redirecting to `/login` otherwise.
//! - [`require_auth`] runs on `/api/` routes and fully verifies the token.
//!
//! Page handlers then verify the token and the permission table themselves,
//! so a forged or expired cookie that passes the edge layer is still caught.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use shared::client::SESSION_COOKIE;
use shared::guard::LOGIN_PATH;
use shared::{AppError, ErrorCode, Module, Role};

use crate::auth::{SessionClaim, cookie};
use crate::core::ServerState;
use crate::security_log;

/// API routes reachable without a session
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/logout"];

/// Authentication middleware for the JSON API
///
/// Reads the token from the `auth-token` cookie (or `Authorization: Bearer`),
/// verifies it and inserts the [`SessionClaim`] into the request extensions.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths (pages have their own guard)
/// - `/api/auth/login`, `/api/auth/logout`
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | No token | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Bad token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let token = match cookie::session_token(req.headers()) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().verify(token) {
        Ok(claim) => {
            req.extensions_mut().insert(claim);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            Err(e.into())
        }
    }
}

/// Admin middleware: the session role must be `ADMIN`
///
/// Must run after [`require_auth`]. A non-admin gets a 403 whose body carries
/// the caller's role as `userRole`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let claim = req
        .extensions()
        .get::<SessionClaim>()
        .ok_or_else(AppError::unauthorized)?;

    if claim.role != Role::Admin {
        security_log!(
            "WARN",
            "admin_required",
            user_id = claim.sub.clone(),
            email = claim.email.clone(),
            user_role = claim.role.as_str(),
            uri = format!("{:?}", req.uri())
        );
        return Err(
            AppError::with_message(ErrorCode::AdminRequired, "Forbidden - Admin access required")
                .with_detail("userRole", claim.role.as_str()),
        );
    }

    Ok(next.run(req).await)
}

/// Edge guard for page routes
///
/// Only checks that the session cookie is present; the token itself is not
/// verified here. Login, unauthorized, API and health routes pass through.
pub async fn edge_redirect(req: Request, next: Next) -> Response {
    let path = req.uri().path();

    if Module::from_path(path).is_none() {
        return next.run(req).await;
    }

    if cookie::read_cookie(req.headers(), SESSION_COOKIE).is_none() {
        tracing::debug!(path = %path, "No session cookie, redirecting to login");
        return Redirect::temporary(LOGIN_PATH).into_response();
    }

    next.run(req).await
}
