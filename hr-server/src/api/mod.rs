//! API routes
//!
//! - [`health`] - health check
//! - [`auth`] - login, logout, current user
//! - [`settings`] - permission table management
//! - [`pages`] - guarded page routes

pub mod auth;
pub mod health;
pub mod pages;
pub mod settings;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::middleware;
use shared::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{edge_redirect, require_auth};
use crate::core::ServerState;

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        // Login is public, the rest needs a session (require_auth)
        .merge(auth::router())
        // Read: any session, write: admin only
        .merge(settings::router())
        // Edge-guarded pages
        .merge(pages::router())
}

/// Malformed or mistyped JSON body → 400
pub(crate) fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // Verifies the session on /api/ routes and injects SessionClaim
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        // Cookie presence check on page routes
        .layer(middleware::from_fn(edge_redirect))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
