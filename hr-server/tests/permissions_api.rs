// hr-server/tests/permissions_api.rs
// Permission settings endpoints

mod common;

use common::{get, json, test_app};
use http::StatusCode;
use hr_server::PermissionStore;
use shared::{Module, PermissionTable, Role};

const PATH: &str = "/api/settings/permissions";

fn table_body(table: &PermissionTable) -> String {
    serde_json::json!({ "permissions": table }).to_string()
}

#[tokio::test]
async fn test_any_session_can_read_table() {
    let app = test_app();

    for role in Role::ALL {
        let cookie = app.cookie(role);
        let (status, _, body) = app.send(get(PATH, Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        let table: PermissionTable = serde_json::from_value(body["permissions"].clone()).unwrap();
        assert_eq!(table, PermissionTable::defaults());
    }

    let (status, _, body) = app.send(get(PATH, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_payroll_cannot_update() {
    let app = test_app();
    let cookie = app.cookie(Role::Payroll);
    let mut table = PermissionTable::defaults();
    table.update_role_permission(Role::Payroll, Module::Settings, true);

    let (status, _, body) = app
        .send(json("POST", PATH, Some(&cookie), &table_body(&table)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["userRole"], "PAYROLL");
    assert!(body["error"].is_string());
    assert!(!app.state.permissions.has_permission(Role::Payroll, Module::Settings));
}

#[tokio::test]
async fn test_only_admin_may_write() {
    let app = test_app();
    let body = table_body(&PermissionTable::defaults());

    for role in [Role::Hr, Role::Payroll, Role::Employee] {
        let cookie = app.cookie(role);
        let (status, _, resp) = app.send(json("POST", PATH, Some(&cookie), &body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(resp["userRole"], role.as_str());

        let patch = r#"{"role":"EMPLOYEE","module":"settings","allowed":true}"#;
        let (status, _, _) = app.send(json("PATCH", PATH, Some(&cookie), patch)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _, _) = app
            .send(json("POST", "/api/settings/permissions/reset", Some(&cookie), ""))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (status, _, _) = app.send(json("POST", PATH, None, &body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_replaces_table_and_it_is_persisted() {
    let app = test_app();
    let cookie = app.cookie(Role::Admin);
    let mut table = PermissionTable::defaults();
    table.update_role_permission(Role::Employee, Module::Reports, true);
    table.update_role_permission(Role::Payroll, Module::Dashboard, false);

    let (status, _, body) = app
        .send(json("POST", PATH, Some(&cookie), &table_body(&table)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());
    assert_eq!(body["permissions"]["EMPLOYEE"]["reports"], true);
    assert_eq!(app.state.permissions.snapshot(), table);

    // Survives a restart
    let reloaded = PermissionStore::open_in(app.dir.path());
    assert_eq!(reloaded.snapshot(), table);
}

#[tokio::test]
async fn test_bad_update_bodies_are_rejected() {
    let app = test_app();
    let cookie = app.cookie(Role::Admin);

    let mut partial = PermissionTable::empty();
    partial.update_role_permission(Role::Employee, Module::Settings, true);

    let bodies = [
        "{oops".to_string(),
        r#"{"permissions": "all"}"#.to_string(),
        r#"{"permissions": {"MANAGER": {"dashboard": true}}}"#.to_string(),
        r#"{"permissions": {"HR": {"dashboard": 1}}}"#.to_string(),
        table_body(&partial),
    ];

    for body in &bodies {
        let (status, _, resp) = app.send(json("POST", PATH, Some(&cookie), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(resp["error"].is_string());
    }

    assert_eq!(app.state.permissions.snapshot(), PermissionTable::defaults());
}

#[tokio::test]
async fn test_admin_patch_and_reset() {
    let app = test_app();
    let cookie = app.cookie(Role::Admin);

    let patch = r#"{"role":"EMPLOYEE","module":"settings","allowed":true}"#;
    let (status, _, body) = app.send(json("PATCH", PATH, Some(&cookie), patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"]["EMPLOYEE"]["settings"], true);
    assert!(app.state.permissions.has_permission(Role::Employee, Module::Settings));

    let (status, _, _) = app
        .send(json("PATCH", PATH, Some(&cookie), r#"{"role":"EMPLOYEE"}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app
        .send(json("POST", "/api/settings/permissions/reset", Some(&cookie), ""))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"]["EMPLOYEE"]["settings"], false);
    assert_eq!(app.state.permissions.snapshot(), PermissionTable::defaults());
}
