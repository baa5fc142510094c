//! Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use raffle_api::domain::{NewUser, UserRepository};

use crate::common::{unique_email, TestApp};

async fn seed_user(app: &TestApp, email: &str, password_hash: String) {
    app.users
        .create(&NewUser {
            email: email.into(),
            name: "Legacy".into(),
            password_hash,
            role: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/register")
        .json(&json!({"email": "a@x.com", "name": "A", "password": "pw123"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
    let user_id = body["user"]["id"].as_i64().unwrap();

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "a@x.com", "password": "pw123"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful");

    let claims = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(i64::from(claims.user_id), user_id);
    assert_eq!(claims.email, "a@x.com");

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "a@x.com", "password": "wrong"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_against_bcrypt_account() {
    let app = TestApp::new();
    let hash = bcrypt::hash("pw123", 4).unwrap().replacen("$2b$", "$2a$", 1);
    seed_user(&app, "old@x.com", hash).await;

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "old@x.com", "password": "wrong"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Incorrect password");

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "old@x.com", "password": "pw123"}))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["token"].is_string());
}

#[tokio::test]
async fn test_login_against_unusable_hash_is_unauthorized() {
    let app = TestApp::new();
    seed_user(&app, "broken@x.com", "plaintext-from-an-old-import".into()).await;

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "broken@x.com", "password": "pw123"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Incorrect password");
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": unique_email(), "password": "pw123"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "User not found");
}

#[tokio::test]
async fn test_duplicate_email_is_500_without_second_row() {
    let app = TestApp::new();
    let email = unique_email();
    app.register(&email, "pw123").await;

    let response = app
        .server
        .post("/register")
        .json(&json!({"email": email, "name": "Other", "password": "other"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to register user");
    assert_eq!(app.users.count_by_email(&email), 1);
}

#[test_case(json!({"name": "A", "password": "pw123"}) ; "missing email")]
#[test_case(json!({"email": "a@x.com", "password": "pw123"}) ; "missing name")]
#[test_case(json!({"email": "a@x.com", "name": "A", "password": ""}) ; "empty password")]
#[test_case(json!({"email": null, "name": "A", "password": "pw123"}) ; "null email")]
#[tokio::test]
async fn test_register_missing_fields_is_400(body: Value) {
    let app = TestApp::new();

    let response = app.server.post("/register").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Missing required fields"), "{error}");
}

#[tokio::test]
async fn test_login_missing_password_is_400() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/login")
        .json(&json!({"email": "a@x.com"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400_with_error_body() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10002);
}
