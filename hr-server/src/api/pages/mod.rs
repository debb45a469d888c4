//! Page routes
//!
//! One route per module plus its subpaths (`/payroll`, `/payroll/{*rest}`).
//! The edge layer has already checked for the cookie; these handlers are the
//! authoritative check against the permission table.

mod handler;

use axum::{Router, routing::get};
use shared::Module;
use shared::guard::{LOGIN_PATH, UNAUTHORIZED_PATH};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let mut router = Router::new()
        .route(LOGIN_PATH, get(handler::login_page))
        .route(UNAUTHORIZED_PATH, get(handler::unauthorized_page));

    for module in Module::ALL {
        let path = module.path();
        router = router
            .route(&path, get(handler::module_page))
            .route(&format!("{}/{{*rest}}", path), get(handler::module_page));
    }

    router
}
