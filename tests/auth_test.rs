//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_signup_success() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "johndoe",
                "email": "johndoe@example.com",
                "password": "password123",
                "first_name": "John",
                "last_name": "Doe",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let user = response.body.get("user").unwrap();
    assert_eq!(user.get("email").unwrap().as_str().unwrap(), "johndoe@example.com");
    assert_eq!(user.get("is_verified").unwrap(), false);
    assert_eq!(user.get("role").unwrap().as_str().unwrap(), "user");
    // The password hash must never appear in a response.
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn test_signup_duplicate_email_conflicts() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("taken@example.com", "password123", "user")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "other",
                "email": "taken@example.com",
                "password": "password123",
                "first_name": "Other",
                "last_name": "Person",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_signup_rejects_invalid_body() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "waytoolongusername",
                "email": "not-an-email",
                "password": "short",
                "first_name": "A",
                "last_name": "B",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_login_success_returns_both_tokens() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("reader@example.com", "password123", "user")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "reader@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("access_token").is_some());
    assert!(response.body.get("refresh_token").is_some());
    assert_eq!(
        response.body.pointer("/user/email").unwrap().as_str().unwrap(),
        "reader@example.com"
    );
}

#[tokio::test]
#[serial]
async fn test_login_wrong_password_unauthorized() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("reader2@example.com", "password123", "user")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "reader2@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_login_unknown_email_same_outcome() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    // Same status as a wrong password: no account oracle.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_me_authenticated() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("me@example.com", "password123", "user")
        .await;
    let token = app.login("me@example.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("email").unwrap().as_str().unwrap(), "me@example.com");
    assert!(response.body.get("books").unwrap().is_array());
    assert!(response.body.get("reviews").unwrap().is_array());
}

#[tokio::test]
#[serial]
async fn test_me_without_header_is_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    // Missing credentials are a different client error than a bad token.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_me_with_garbage_token_is_forbidden() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body.get("error").unwrap().as_str().unwrap(), "INVALID_TOKEN");
}

#[tokio::test]
#[serial]
async fn test_logout_revokes_the_access_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("bye@example.com", "password123", "user")
        .await;
    let token = app.login("bye@example.com", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The exact same token must now fail verification even though its
    // expiry has not passed.
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body.get("error").unwrap().as_str().unwrap(), "INVALID_TOKEN");
}

#[tokio::test]
#[serial]
async fn test_refresh_issues_working_access_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("fresh@example.com", "password123", "user")
        .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "fresh@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    let refresh_token = login
        .body
        .get("refresh_token")
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let new_access = response
        .body
        .get("access_token")
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();
    let me = app
        .request("GET", "/api/auth/me", None, Some(&new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_access_token_rejected_by_refresh_endpoint() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("kinds@example.com", "password123", "user")
        .await;
    let access = app.login("kinds@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access })),
            None,
        )
        .await;

    // Kind mismatch surfaces as the uniform invalid-token outcome.
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body.get("error").unwrap().as_str().unwrap(), "INVALID_TOKEN");
}

#[tokio::test]
#[serial]
async fn test_refresh_token_rejected_as_bearer() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("bearer@example.com", "password123", "user")
        .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bearer@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    let refresh_token = login.body.get("refresh_token").unwrap().as_str().unwrap();

    let response = app
        .request("GET", "/api/auth/me", None, Some(refresh_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_email_verification_flow() {
    let app = helpers::TestApp::new().await;

    app.request(
        "POST",
        "/api/auth/signup",
        Some(serde_json::json!({
            "username": "unveri",
            "email": "unverified@example.com",
            "password": "password123",
            "first_name": "Un",
            "last_name": "Verified",
        })),
        None,
    )
    .await;

    // Mint the link token the mail would have carried.
    let codec = bookly_auth::verify::VerificationTokenCodec::new(&app.config.auth);
    let token = codec.create("unverified@example.com").unwrap();

    let response = app
        .request("GET", &format!("/api/auth/verify/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let verified: bool = sqlx::query_scalar("SELECT is_verified FROM users WHERE email = $1")
        .bind("unverified@example.com")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert!(verified);

    // Re-verifying is idempotent.
    let response = app
        .request("GET", &format!("/api/auth/verify/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_verification_with_garbage_token_fails() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/verify/garbage-token", None, None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_password_reset_flow() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("reset@example.com", "oldpassword", "user")
        .await;

    // Requesting a reset never discloses whether the account exists.
    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-request",
            Some(serde_json::json!({ "email": "reset@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-request",
            Some(serde_json::json!({ "email": "ghost@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Confirm with the link token.
    let codec = bookly_auth::verify::VerificationTokenCodec::new(&app.config.auth);
    let token = codec.create("reset@example.com").unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/auth/password-reset-confirm/{token}"),
            Some(serde_json::json!({
                "new_password": "newpassword",
                "confirm_new_password": "newpassword",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Old password no longer works; the new one does.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "reset@example.com",
                "password": "oldpassword",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login("reset@example.com", "newpassword").await;
}

#[tokio::test]
#[serial]
async fn test_password_reset_mismatch_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("mismatch@example.com", "password123", "user")
        .await;

    let codec = bookly_auth::verify::VerificationTokenCodec::new(&app.config.auth);
    let token = codec.create("mismatch@example.com").unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/auth/password-reset-confirm/{token}"),
            Some(serde_json::json!({
                "new_password": "newpassword1",
                "confirm_new_password": "newpassword2",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
