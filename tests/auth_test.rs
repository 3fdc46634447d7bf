//! Integration tests for the authentication flow.

mod helpers;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::json;

use claimdesk_entity::user::UserRole;
use helpers::{ROOT_EMAIL, TestApp};

fn expiry(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("expiry timestamp")
}

#[tokio::test]
async fn test_register_login_deactivate_scenario() {
    let app = TestApp::new().await;
    let root = app.root_token().await;

    let registered = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "admin@x.com",
                "password": "Admin@123",
                "name": "Second Admin",
                "role": "admin",
            })),
            Some(&root),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.data()["email"], "admin@x.com");
    assert!(registered.data().get("password_hash").is_none());
    let id = registered.data()["id"].as_str().unwrap().to_string();

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "admin@x.com", "password": "Admin@123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.data()["access_token"].as_str().is_some());
    assert_eq!(login.data()["user"]["role"], "admin");

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "admin@x.com", "password": "Admin@124" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error_code(), "INVALID_CREDENTIALS");

    let deactivated = app
        .request(
            "POST",
            &format!("/api/admin/users/{id}/deactivate"),
            None,
            Some(&root),
        )
        .await;
    assert_eq!(deactivated.status, StatusCode::OK);
    assert_eq!(deactivated.data()["is_active"], false);

    let inactive = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "admin@x.com", "password": "Admin@123" })),
            None,
        )
        .await;
    assert_eq!(inactive.status, StatusCode::FORBIDDEN);
    assert_eq!(inactive.error_code(), "ACCOUNT_INACTIVE");
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_password() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@x.com", "password": "Whatever@1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = TestApp::new().await;
    app.create_identity("Officer@Police.go.ke", "Police@123", UserRole::Police, None)
        .await;
    let (access, _) = app.login("  OFFICER@police.GO.KE ", "Police@123").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "officer@police.go.ke");
}

#[tokio::test]
async fn test_malformed_login_body_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/auth/login", Some(json!({ "email": ROOT_EMAIL })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let empty = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_yields_later_expiry_for_same_identity() {
    let app = TestApp::new().await;
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ROOT_EMAIL, "password": helpers::ROOT_PASSWORD })),
            None,
        )
        .await;
    let refresh_token = login.data()["refresh_token"].as_str().unwrap().to_string();
    let first_expiry = expiry(&login.data()["access_expires_at"]);
    let user_id = login.data()["user"]["id"].clone();

    let refreshed = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh_token))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert!(expiry(&refreshed.data()["access_expires_at"]) > first_expiry);

    let new_access = refreshed.data()["access_token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(new_access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["id"], user_id);
}

#[tokio::test]
async fn test_token_types_are_not_interchangeable() {
    let app = TestApp::new().await;
    let (access, refresh) = app.login(ROOT_EMAIL, helpers::ROOT_PASSWORD).await;

    let refresh_with_access = app
        .request("POST", "/api/auth/refresh", None, Some(&access))
        .await;
    assert_eq!(refresh_with_access.status, StatusCode::UNAUTHORIZED);
    assert_eq!(refresh_with_access.error_code(), "INVALID_OR_EXPIRED_TOKEN");

    let me_with_refresh = app.request("GET", "/api/auth/me", None, Some(&refresh)).await;
    assert_eq!(me_with_refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_or_garbage_bearer_is_rejected() {
    let app = TestApp::new().await;
    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "INVALID_OR_EXPIRED_TOKEN");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_access_and_refresh_tokens() {
    let app = TestApp::new().await;
    let (access, refresh) = app.login(ROOT_EMAIL, helpers::ROOT_PASSWORD).await;

    let logout = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": refresh })),
            Some(&access),
        )
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let refreshed = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh))
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);

    // A fresh login still works.
    let (again, _) = app.login(ROOT_EMAIL, helpers::ROOT_PASSWORD).await;
    let me = app.request("GET", "/api/auth/me", None, Some(&again)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_body() {
    let app = TestApp::new().await;
    let (access, refresh) = app.login(ROOT_EMAIL, helpers::ROOT_PASSWORD).await;

    let logout = app.request("POST", "/api/auth/logout", None, Some(&access)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let refreshed = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_police_cannot_register_users() {
    let app = TestApp::new().await;
    let police = app
        .token_for("officer1@police.go.ke", "Police@123", UserRole::Police, None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "new@x.com",
                "password": "Admin@123",
                "name": "New",
                "role": "admin",
            })),
            Some(&police),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");

    let malformed = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": 42, "role": "superuser" })),
            Some(&police),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_normalizes_email_before_validation() {
    let app = TestApp::new().await;
    let root = app.root_token().await;

    let registered = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "  Grace.Otieno@Police.go.ke ",
                "password": "Police@123",
                "name": "Grace Otieno",
                "role": "police",
            })),
            Some(&root),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);
    assert_eq!(registered.data()["email"], "grace.otieno@police.go.ke");

    let invalid = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": "Police@123",
                "name": "Nobody",
                "role": "police",
            })),
            Some(&root),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_passwords() {
    let app = TestApp::new().await;
    let root = app.root_token().await;
    let body = |email: &str, password: &str| {
        json!({
            "email": email,
            "password": password,
            "name": "Jane Smith",
            "role": "insurance_agent",
            "company_id": "INS001",
        })
    };

    let created = app
        .request(
            "POST",
            "/api/auth/register",
            Some(body("jane.smith@kenyainsurance.co.ke", "Officer@123")),
            Some(&root),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["company_id"], "INS001");

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(body("Jane.Smith@KenyaInsurance.co.ke", "Officer@123")),
            Some(&root),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let weak = app
        .request(
            "POST",
            "/api/auth/register",
            Some(body("weak@x.com", "password")),
            Some(&root),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deactivation_invalidates_outstanding_tokens() {
    let app = TestApp::new().await;
    let root = app.root_token().await;
    let officer = app
        .create_identity("officer2@police.go.ke", "Police@123", UserRole::Police, None)
        .await;
    let (access, refresh) = app.login("officer2@police.go.ke", "Police@123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/deactivate", officer.id),
            None,
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    let refreshed = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh))
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);

    let reactivated = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/reactivate", officer.id),
            None,
            Some(&root),
        )
        .await;
    assert_eq!(reactivated.status, StatusCode::OK);
    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let token = app
        .token_for("officer3@police.go.ke", "Police@123", UserRole::Police, None)
        .await;

    let wrong_current = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(json!({ "current_password": "Nope@1234", "new_password": "Station#42" })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNAUTHORIZED);

    let changed = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(json!({ "current_password": "Police@123", "new_password": "Station#42" })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    app.login("officer3@police.go.ke", "Station#42").await;
    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "officer3@police.go.ke", "password": "Police@123" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_user_listing_filters() {
    let app = TestApp::new().await;
    let root = app.root_token().await;
    app.create_identity("a1@ins.ke", "Officer@123", UserRole::InsuranceAgent, Some("INS001"))
        .await;
    app.create_identity("a2@ins.ke", "Officer@123", UserRole::InsuranceAgent, Some("INS002"))
        .await;
    app.create_identity("p1@police.go.ke", "Police@123", UserRole::Police, None)
        .await;

    let all = app.request("GET", "/api/admin/users", None, Some(&root)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data().as_array().unwrap().len(), 4);

    let agents = app
        .request(
            "GET",
            "/api/admin/users?role=insurance_agent&company_id=INS002",
            None,
            Some(&root),
        )
        .await;
    let agents = agents.data().as_array().unwrap().clone();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["email"], "a2@ins.ke");

    let police = app.token_for("p2@police.go.ke", "Police@123", UserRole::Police, None).await;
    let denied = app.request("GET", "/api/admin/users", None, Some(&police)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}
