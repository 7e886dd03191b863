//! Common test utilities and helpers
//!
//! Builds the real router over a `MemoryStore` and drives it with
//! `tower::ServiceExt::oneshot`. Provides:
//! - `TestApp` with request helpers
//! - Account fixtures (signup, onboarding)
//! - Token helpers

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use chatmates::backend::auth::sessions::create_token;
use chatmates::backend::server::create_app_with_store;
use chatmates::backend::store::MemoryStore;
use chatmates::shared::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "password123";

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Account created through the API
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            .bcrypt_cost(4)
            .static_dir("target/nonexistent-static")
            .build()
            .expect("test config is valid");
        let store = Arc::new(MemoryStore::new());
        let router = create_app_with_store(store.clone(), config.clone());
        Self {
            router,
            store,
            config,
        }
    }

    /// Send a request, optionally with a bearer token and JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::GET, uri, Some(&user.token), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(&user.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::PUT, uri, Some(&user.token), None).await
    }

    /// Register an account through `POST /api/auth/signup`
    pub async fn signup(&self, full_name: &str) -> TestUser {
        let email = format!("{}_{}@example.com", full_name.to_lowercase(), Uuid::new_v4().simple());
        let response = self
            .request(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "fullName": full_name,
                    "email": email,
                    "password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "signup failed: {}", response.body);

        TestUser {
            id: response.body["user"]["id"]
                .as_str()
                .and_then(|id| Uuid::parse_str(id).ok())
                .expect("signup returns user id"),
            email,
            token: response.body["token"]
                .as_str()
                .expect("signup returns token")
                .to_string(),
        }
    }

    /// Register and complete onboarding
    pub async fn onboarded_user(&self, full_name: &str) -> TestUser {
        let user = self.signup(full_name).await;
        let response = self
            .post(
                "/api/auth/onboarding",
                &user,
                json!({
                    "fullName": full_name,
                    "bio": "Here to practice",
                    "nativeLanguage": "english",
                    "learningLanguage": "spanish",
                    "location": "Lisbon",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "onboarding failed: {}", response.body);
        user
    }

    /// Token for an arbitrary subject, signed with the app's secret
    pub fn token_for(&self, user_id: Uuid) -> String {
        create_token(TEST_SECRET, self.config.token_ttl_secs(), user_id, "ghost@example.com")
            .expect("token created")
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Ids from a JSON array of objects carrying `id`
pub fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
