mod common;

use chrono::Duration;
use common::TestApp;
use common::JWT_SECRET;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app.signup("ann@example.com", "Ann").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "Sign-up completed");
    assert_eq!(body["data"]["email"], "ann@example.com");
    assert_eq!(body["data"]["nickname"], "Ann");
    assert_eq!(body["data"]["role"], "USER");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    app.signup("ann@example.com", "Ann").await;
    let response = app.signup("ann@example.com", "Another").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert_eq!(body["data"]["code"], "U002");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_signup_duplicate_nickname() {
    let app = TestApp::spawn().await;

    app.signup("ann@example.com", "Ann").await;
    let response = app.signup("bob@example.com", "Ann").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert_eq!(body["data"]["code"], "U005");
}

#[tokio::test]
async fn test_signup_rejects_invalid_input() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({"email": "not-an-email", "password": PASSWORD, "nickname": "Ann"}),
        json!({"email": "ann@example.com", "password": "short", "nickname": "Ann"}),
        json!({"email": "ann@example.com", "password": PASSWORD, "nickname": "  "}),
        json!({"email": "ann@example.com", "password": PASSWORD}),
    ];

    for case in cases {
        let response = app
            .post("/api/auth/signup")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case: {}", case);

        let body = json_body(response).await;
        assert_eq!(body["data"]["code"], "C002");
    }
}

#[tokio::test]
async fn test_signup_allowed_again_after_soft_delete() {
    let app = TestApp::spawn().await;

    app.signup("ann@example.com", "Ann").await;
    assert!(app.repository.soft_delete("ann@example.com").await);

    let response = app.signup("ann@example.com", "Ann").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;

    assert_eq!(data["token_type"], "Bearer");
    let expires_in = data["expires_in"].as_i64().unwrap();
    assert!(expires_in > 0);
    assert!(expires_in <= Duration::hours(24).num_milliseconds());

    let access_token = data["access_token"].as_str().unwrap();
    let refresh_token = data["refresh_token"].as_str().unwrap();
    assert!(app.tokens.validate_token(access_token));
    assert!(app.tokens.validate_token(refresh_token));
    assert_eq!(
        app.tokens.email_from_token(access_token).unwrap(),
        "ann@example.com"
    );
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.signup("ann@example.com", "Ann").await;
    let response = app.login("ann@example.com", "wrong_password").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["data"]["code"], "U003");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app.login("nobody@example.com", PASSWORD).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["data"]["code"], "U001");
}

#[tokio::test]
async fn test_login_soft_deleted_user() {
    let app = TestApp::spawn().await;

    app.signup("ann@example.com", "Ann").await;
    app.repository.soft_delete("ann@example.com").await;

    let response = app.login("ann@example.com", PASSWORD).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["data"]["code"], "U001");
}

#[tokio::test]
async fn test_refresh_success() {
    let app = TestApp::spawn().await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    let response = app.refresh(data["refresh_token"].as_str().unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);

    let refreshed = json_body(response).await["data"].clone();
    assert_eq!(refreshed["token_type"], "Bearer");
    assert_ne!(refreshed["access_token"], data["access_token"]);

    let access_token = refreshed["access_token"].as_str().unwrap();
    assert_eq!(
        app.tokens.email_from_token(access_token).unwrap(),
        "ann@example.com"
    );
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app.refresh("not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["data"]["code"], "U004");
}

#[tokio::test]
async fn test_refresh_with_foreign_secret() {
    let app = TestApp::spawn().await;
    app.signup("ann@example.com", "Ann").await;

    let foreign = auth::TokenProvider::new(
        b"another-secret-key-that-is-at-least-32-bytes",
        Duration::hours(1),
        Duration::days(1),
    )
    .unwrap();
    let token = foreign.create_refresh_token("ann@example.com").unwrap();

    let response = app.refresh(&token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let app = TestApp::spawn_with_lifetimes(Duration::hours(1), Duration::seconds(-10)).await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    let response = app.refresh(data["refresh_token"].as_str().unwrap()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["data"]["code"], "U004");
}

#[tokio::test]
async fn test_refresh_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/refresh")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["data"]["code"], "C002");
}

#[tokio::test]
async fn test_refresh_after_account_deleted() {
    let app = TestApp::spawn().await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    app.repository.soft_delete("ann@example.com").await;

    let response = app.refresh(data["refresh_token"].as_str().unwrap()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["data"]["code"], "U001");
}

#[tokio::test]
async fn test_me_with_access_token() {
    let app = TestApp::spawn().await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    let response = app
        .get_authenticated("/api/auth/me", data["access_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["email"], "ann@example.com");
    assert_eq!(body["data"]["authorities"], json!(["ROLE_USER"]));
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["data"]["code"], "U004");
}

#[tokio::test]
async fn test_me_rejects_refresh_token() {
    let app = TestApp::spawn().await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    let response = app
        .get_authenticated("/api/auth/me", data["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_expired_access_token() {
    let app = TestApp::spawn_with_lifetimes(Duration::seconds(-10), Duration::days(7)).await;

    let data = app.signup_and_login("ann@example.com", "Ann").await;
    let response = app
        .get_authenticated("/api/auth/me", data["access_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "UP");
    assert_eq!(body["data"]["service"], "account-service");
}

#[test]
fn test_secret_is_long_enough() {
    assert!(JWT_SECRET.len() >= auth::JwtHandler::MIN_SECRET_LENGTH);
}
