//! Page handlers: guarded module pages plus the login and unauthorized pages

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use shared::guard::{LOGIN_PATH, UNAUTHORIZED_PATH};
use shared::{GuardOutcome, Module, UserInfo};

use crate::auth::cookie;
use crate::core::ServerState;
use crate::security_log;

/// Context handed to an authorized page
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub module: Module,
    pub user: UserInfo,
    /// Role landing page
    pub dashboard: &'static str,
}

/// Guarded module page
pub async fn module_page(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let Some(module) = Module::from_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    // Present but unusable tokens end up here, not at the edge layer
    let user = cookie::session_token(&headers)
        .and_then(|token| state.get_jwt_service().verify(token).ok())
        .and_then(|claim| state.users.find_by_id(&claim.sub))
        .filter(|user| user.is_active);

    match state.permissions.authorize(user.map(|u| u.role), module) {
        GuardOutcome::Authorized => {}
        GuardOutcome::Unauthenticated => {
            security_log!("WARN", "page_unauthenticated", path = uri.path());
            return Redirect::temporary(LOGIN_PATH).into_response();
        }
        GuardOutcome::Forbidden => {
            security_log!(
                "WARN",
                "page_forbidden",
                path = uri.path(),
                module = module.as_str(),
                user_role = user.map(|u| u.role.as_str()).unwrap_or_default()
            );
            return Redirect::temporary(UNAUTHORIZED_PATH).into_response();
        }
    }

    let Some(user) = user else {
        return Redirect::temporary(LOGIN_PATH).into_response();
    };

    Json(PageContext {
        module,
        user: user.info(),
        dashboard: user.role.descriptor().dashboard_path,
    })
    .into_response()
}

pub async fn login_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "login", "action": "/api/auth/login" }))
}

pub async fn unauthorized_page() -> Json<serde_json::Value> {
    Json(json!({
        "page": "unauthorized",
        "message": "You do not have access to this page",
    }))
}
