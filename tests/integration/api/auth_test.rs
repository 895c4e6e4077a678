//! Authentication API integration tests
//!
//! Tests for registration, login, email confirmation, the profile endpoint
//! and access-token refresh.

#[cfg(test)]
mod tests {
    use axum::http::{header::SET_COOKIE, StatusCode};
    use chrono::Duration;
    use serde_json::json;
    use taskboard::backend::auth::UserResponse;

    use crate::assert_contains;
    use crate::assert_error_response;
    use crate::common::{
        access_cookie, bearer, create_test_user, login, test_config, unique_email, TestApp, TEST_PASSWORD,
    };

    async fn register_with_password(app: &TestApp, password: &str) -> axum_test::TestResponse {
        app.server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": unique_email(),
                "password": password
            }))
            .await
    }

    #[tokio::test]
    async fn test_register_mails_confirmation_link() {
        let app = TestApp::new();
        let email = unique_email();

        let response = app
            .server
            .post("/register")
            .json(&json!({
                "username": "alice",
                "email": email,
                "password": TEST_PASSWORD
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], email.as_str());
        let token = body["token"].as_str().unwrap();

        let sent = app.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, email);
        assert_contains!(
            sent[0].body,
            &format!("http://boards.test/confirm_email/{}", token)
        );
    }

    #[tokio::test]
    async fn test_register_password_rules() {
        let app = TestApp::new();
        let cases = [
            ("short1", "Password is too short."),
            ("longenough", "Password should contain at least one number."),
            ("longenough1", "Password should contain at least one uppercase letter."),
            ("Longenough1", "Password should contain at least one special character."),
        ];

        for (password, message) in cases {
            let response = register_with_password(&app, password).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", password);
            let body: serde_json::Value = response.json();
            assert_eq!(body["msg"], message, "{}", password);
        }

        let response = register_with_password(&app, "Longenough1!").await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;

        let response = app
            .server
            .post("/register")
            .json(&json!({
                "username": "someone else",
                "email": user.email,
                "password": TEST_PASSWORD
            }))
            .await;

        assert_error_response!(response, StatusCode::BAD_REQUEST, "Email already exists.");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_fields() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/register")
            .json(&json!({ "username": "alice", "email": "not-an-email", "password": TEST_PASSWORD }))
            .await;
        assert_error_response!(response, StatusCode::BAD_REQUEST, "Email address is invalid.");

        let response = app
            .server
            .post("/register")
            .json(&json!({ "username": "  ", "email": unique_email(), "password": TEST_PASSWORD }))
            .await;
        assert_error_response!(response, StatusCode::BAD_REQUEST, "Username is required.");

        assert!(app.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_login_sets_access_cookie() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;

        let response = app
            .server
            .post("/login")
            .json(&json!({ "email": user.email, "password": user.password }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        let token = body["token"].as_str().unwrap();

        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("access_token_cookie={}", token)));
        assert_contains!(cookie, "HttpOnly");
    }

    #[tokio::test]
    async fn test_login_failures_share_message() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;

        for (email, password) in [
            (user.email.as_str(), "Wrongpassword1!"),
            ("nobody@example.com", TEST_PASSWORD),
        ] {
            let response = app
                .server
                .post("/login")
                .json(&json!({ "email": email, "password": password }))
                .await;
            assert_error_response!(response, StatusCode::UNAUTHORIZED, "Your password is invalid.");
        }
    }

    #[tokio::test]
    async fn test_confirm_email() {
        let app = TestApp::new();
        let email = unique_email();
        let response = app
            .server
            .post("/register")
            .json(&json!({ "username": "carol", "email": email, "password": TEST_PASSWORD }))
            .await;
        let body: serde_json::Value = response.json();
        let token = body["token"].as_str().unwrap().to_string();

        let response = app.server.get(&format!("/confirm_email/{}", token)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let user: UserResponse = response.json();
        assert_eq!(user.email, email);
        assert!(user.is_confirmed);

        // Confirming twice is harmless
        let response = app.server.get(&format!("/confirm_email/{}", token)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_confirm_email_rejects_garbage() {
        let app = TestApp::new();

        let response = app.server.get("/confirm_email/not-a-token").await;

        assert_error_response!(
            response,
            StatusCode::BAD_REQUEST,
            "The link is either invalid or has expired."
        );
    }

    #[tokio::test]
    async fn test_user_profile_with_bearer() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app.server.get("/user_profile").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let profile: UserResponse = response.json();
        assert_eq!(profile.email, user.email);
        assert_eq!(profile.username, user.username);
        assert!(!profile.is_confirmed);
    }

    #[tokio::test]
    async fn test_user_profile_with_cookie() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;
        let (name, value) = access_cookie(&user.token);

        let response = app.server.get("/user_profile").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let profile: UserResponse = response.json();
        assert_eq!(profile.email, user.email);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = TestApp::new();

        let response = app.server.get("/user_profile").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = app.server.get("/api/list_boards").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let (name, value) = bearer("garbage.token.value");
        let response = app.server.get("/user_profile").add_header(name, value).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_close_to_expiry_is_refreshed() {
        let app = TestApp::with_access_ttl(Duration::minutes(20));
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app.server.get("/user_profile").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("access_token_cookie="));

        let refreshed = cookie
            .trim_start_matches("access_token_cookie=")
            .split(';')
            .next()
            .unwrap();
        let claims = app.state.sessions.verify_token(refreshed).unwrap();
        assert_eq!(claims.email, user.email);
    }

    #[tokio::test]
    async fn test_fresh_token_is_not_refreshed() {
        let app = TestApp::with_access_ttl(Duration::minutes(60));
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app.server.get("/user_profile").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_zero_refresh_window_disables_refresh() {
        let mut config = test_config();
        config.access_token_ttl = Duration::minutes(20);
        config.refresh_window = Duration::zero();
        let app = TestApp::with_config(config);
        let user = create_test_user(&app.server).await;
        let (name, value) = bearer(&user.token);

        let response = app.server.get("/user_profile").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_token_is_valid_session() {
        let app = TestApp::new();
        let user = create_test_user(&app.server).await;

        let token = login(&app.server, &user.email, &user.password).await;
        let claims = app.state.sessions.verify_token(&token).unwrap();

        assert_eq!(claims.email, user.email);
        assert!(claims.user_id().is_some());
    }
}
