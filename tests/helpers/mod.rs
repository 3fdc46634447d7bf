//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use claimdesk_api::{build_app, build_state};
use claimdesk_auth::password::{PasswordHasher, PasswordValidator};
use claimdesk_core::config::{AppConfig, AuthConfig};
use claimdesk_database::Stores;
use claimdesk_entity::user::{User, UserRole};
use claimdesk_service::{AdminUserService, RegisterUser};

pub const ROOT_EMAIL: &str = "root@claimdesk.test";
pub const ROOT_PASSWORD: &str = "Root@12345";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing stores for direct setup
    pub stores: Stores,
    admin: AdminUserService,
}

/// Configuration with cheap password hashing.
pub fn test_config() -> AppConfig {
    AppConfig {
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    }
}

impl TestApp {
    /// Create a new test application on empty in-memory stores, with one
    /// bootstrap admin (`ROOT_EMAIL`).
    pub async fn new() -> Self {
        let config = test_config();
        let stores = Stores::in_memory();

        let admin = AdminUserService::new(
            Arc::clone(&stores.identities),
            Arc::new(PasswordHasher::new(&config.auth).expect("hasher")),
            Arc::new(PasswordValidator::new(&config.auth)),
        );

        let state = build_state(config, stores.clone(), None).expect("Failed to build state");
        let app = Self {
            router: build_app(state),
            stores,
            admin,
        };
        app.create_identity(ROOT_EMAIL, ROOT_PASSWORD, UserRole::Admin, None)
            .await;
        app
    }

    /// Insert an identity directly, bypassing the HTTP layer.
    pub async fn create_identity(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        company_id: Option<&str>,
    ) -> User {
        self.admin
            .create(RegisterUser {
                email: email.to_string(),
                password: password.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                role,
                company_id: company_id.map(String::from),
            })
            .await
            .expect("Failed to create identity")
    }

    /// Log in and return `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        (
            response.data()["access_token"].as_str().unwrap().to_string(),
            response.data()["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Access token of the bootstrap admin.
    pub async fn root_token(&self) -> String {
        self.login(ROOT_EMAIL, ROOT_PASSWORD).await.0
    }

    /// Create an identity and log it in, returning its access token.
    pub async fn token_for(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        company_id: Option<&str>,
    ) -> String {
        self.create_identity(email, password, role, company_id).await;
        self.login(email, password).await.0
    }

    /// Make a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Simplified response for assertions
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
