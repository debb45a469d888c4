//! Permission settings routes
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/settings/permissions | GET | any session |
//! | /api/settings/permissions | POST | ADMIN |
//! | /api/settings/permissions | PATCH | ADMIN |
//! | /api/settings/permissions/reset | POST | ADMIN |

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes =
        Router::new().route("/api/settings/permissions", get(handler::get_permissions));

    let admin_routes = Router::new()
        .route(
            "/api/settings/permissions",
            post(handler::update_permissions).patch(handler::update_role_permission),
        )
        .route(
            "/api/settings/permissions/reset",
            post(handler::reset_permissions),
        )
        .route_layer(middleware::from_fn(require_admin));

    read_routes.merge(admin_routes)
}
