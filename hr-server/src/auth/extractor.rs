//! Session extractor
//!
//! Validates the session token of the request and yields its [`SessionClaim`].

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;

use crate::auth::{SessionClaim, cookie};
use crate::core::ServerState;
use crate::security_log;

impl FromRequestParts<ServerState> for SessionClaim {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by require_auth
        if let Some(claim) = parts.extensions.get::<SessionClaim>() {
            return Ok(claim.clone());
        }

        let Some(token) = cookie::session_token(&parts.headers) else {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
            return Err(AppError::unauthorized());
        };

        match state.get_jwt_service().verify(token) {
            Ok(claim) => {
                parts.extensions.insert(claim.clone());
                Ok(claim)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );
                Err(e.into())
            }
        }
    }
}
