// hr-server/tests/common/mod.rs
// Shared fixtures for the router tests

#![allow(dead_code)]

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use hr_server::auth::password::hash_password;
use hr_server::{Config, ServerState, SessionClaim, UserDirectory, UserRecord, build_app};
use serde_json::Value;
use shared::Role;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub dir: TempDir,
}

/// One active user per role plus a disabled employee, hashed once per binary
fn users() -> &'static Vec<UserRecord> {
    static USERS: OnceLock<Vec<UserRecord>> = OnceLock::new();
    USERS.get_or_init(|| {
        let hash = hash_password(PASSWORD).unwrap();
        let mut users: Vec<UserRecord> = Role::ALL
            .into_iter()
            .map(|role| UserRecord {
                id: user_id(role),
                email: email(role),
                name: format!("{} User", role),
                role,
                avatar: None,
                password_hash: hash.clone(),
                is_active: true,
            })
            .collect();
        users.push(UserRecord {
            id: "u-disabled".to_string(),
            email: "disabled@hr.test".to_string(),
            name: "Disabled User".to_string(),
            role: Role::Employee,
            avatar: None,
            password_hash: hash,
            is_active: false,
        });
        users
    })
}

pub fn user_id(role: Role) -> String {
    format!("u-{}", role.as_str().to_ascii_lowercase())
}

pub fn email(role: Role) -> String {
    format!("{}@hr.test", role.as_str().to_ascii_lowercase())
}

pub fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    config.login_delay_ms = 0;

    let state = ServerState::new(config, UserDirectory::new(users().clone()));
    TestApp {
        app: build_app(state.clone()),
        state,
        dir,
    }
}

impl TestApp {
    /// Signed token for the fixture user of `role`
    pub fn token(&self, role: Role) -> String {
        self.state
            .jwt_service
            .issue(&SessionClaim {
                sub: user_id(role),
                email: email(role),
                name: format!("{} User", role),
                role,
            })
            .unwrap()
    }

    pub fn cookie(&self, role: Role) -> String {
        format!("auth-token={}", self.token(role))
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, body)
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn location(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
}
