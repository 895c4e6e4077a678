//! Authentication test helpers
//!
//! Provides utilities for registering test users, logging them in and
//! building the headers protected routes expect.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

/// Password that satisfies every strength rule
pub const TEST_PASSWORD: &str = "Longenough1!";

/// Test user credentials
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Access token from `/login`
    pub token: String,
}

/// A unique email address for each call
pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}

/// Register and log in a user with a unique email
pub async fn create_test_user(server: &TestServer) -> TestUser {
    let email = unique_email();
    let username = format!("user_{}", &email[5..13]);

    let response = server
        .post("/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "registration failed");

    let token = login(server, &email, TEST_PASSWORD).await;
    TestUser {
        username,
        email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

/// Log in and return the access token
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed");

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Create authorization header value
pub fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header value")
}

/// Header pair for a bearer token
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (header::AUTHORIZATION, auth_header(token))
}

/// Header pair carrying the token as the access cookie
pub fn access_cookie(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("access_token_cookie={}", token))
        .expect("token is a valid cookie value");
    (header::COOKIE, value)
}
