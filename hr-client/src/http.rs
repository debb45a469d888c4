//! HTTP client for the HR server API
//!
//! The session token is kept the way a browser keeps it: captured from the
//! `Set-Cookie` header of the login response and sent back as a `Cookie`.

use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use shared::client::{
    LoginRequest, LoginResponse, MeResponse, PermissionsResponse, PermissionsUpdatedResponse,
    SESSION_COOKIE, SuccessResponse, UpdatePermissionsRequest, UpdateRolePermissionRequest,
};
use shared::{ErrorBody, Module, PermissionTable, Role, UserInfo};

use crate::{ClientConfig, ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Reuse an existing session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Current session token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token)),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.with_session(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.with_session(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.with_session(self.client.post(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.with_session(self.client.patch(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let body = serde_json::from_str::<ErrorBody>(&text).ok();
            let message = body
                .as_ref()
                .map(|b| b.error.clone())
                .unwrap_or_else(|| text.clone());

            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(message)),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden {
                    message,
                    user_role: body
                        .as_ref()
                        .and_then(|b| b.details.get("userRole"))
                        .and_then(|v| v.as_str())
                        .and_then(|s| s.parse::<Role>().ok()),
                }),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login and keep the session cookie
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;

        let token = session_cookie_value(response.headers());
        let login: LoginResponse = Self::handle_response(response).await?;

        self.token = Some(token.ok_or_else(|| {
            ClientError::InvalidResponse("Login response carried no session cookie".to_string())
        })?);

        tracing::debug!(user_id = %login.user.id, role = %login.user.role, "Logged in");
        Ok(login)
    }

    /// Current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        Ok(self.get::<MeResponse>("/api/auth/me").await?.user)
    }

    /// Logout and forget the session
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<SuccessResponse>("/api/auth/logout").await?;
        self.token = None;
        Ok(())
    }

    // ========== Permission settings API ==========

    /// Current server table
    pub async fn permissions(&self) -> ClientResult<PermissionTable> {
        Ok(self
            .get::<PermissionsResponse>("/api/settings/permissions")
            .await?
            .permissions)
    }

    /// Replace the server table (ADMIN only)
    pub async fn update_permissions(
        &self,
        permissions: PermissionTable,
    ) -> ClientResult<PermissionsUpdatedResponse> {
        self.post(
            "/api/settings/permissions",
            &UpdatePermissionsRequest { permissions },
        )
        .await
    }

    /// Set one cell of the server table (ADMIN only)
    pub async fn update_role_permission(
        &self,
        role: Role,
        module: Module,
        allowed: bool,
    ) -> ClientResult<PermissionsUpdatedResponse> {
        self.patch(
            "/api/settings/permissions",
            &UpdateRolePermissionRequest {
                role,
                module,
                allowed,
            },
        )
        .await
    }

    /// Restore the server's seed table (ADMIN only)
    pub async fn reset_permissions(&self) -> ClientResult<PermissionsUpdatedResponse> {
        self.post_empty("/api/settings/permissions/reset").await
    }
}

/// `auth-token` value from the response's `Set-Cookie` headers
fn session_cookie_value(headers: &header::HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
