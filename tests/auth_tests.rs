mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{assert_error_body, json_body, register, request, test_app};

#[tokio::test]
async fn register_returns_201_and_a_token() {
    let app = test_app();
    let res = request(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "pw123456", "firstName": "A"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = json_body(res).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    // The token is the whole response.
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = test_app();
    register(&app, "a@x.com", "A").await;

    let res = request(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "pw123456", "firstName": "Again"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_error_body(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn reregistration_succeeds_after_deletion() {
    let app = test_app();
    let token = register(&app, "a@x.com", "A").await;

    let res = request(
        app.clone(),
        Method::DELETE,
        "/user/a@x.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    register(&app, "a@x.com", "A").await;
}

#[tokio::test]
async fn register_validates_the_payload() {
    let app = test_app();

    let invalid_email = request(
        app.clone(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "not-an-email", "password": "pw123456", "firstName": "A"})),
    )
    .await;
    assert_eq!(invalid_email.status(), StatusCode::BAD_REQUEST);

    let short_password = request(
        app.clone(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "short", "firstName": "A"})),
    )
    .await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);

    let blank_name = request(
        app.clone(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "pw123456", "firstName": "  "})),
    )
    .await;
    assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

    // Missing fields are 400 as well, in the standard error envelope.
    let missing_password = request(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({"email": "a@x.com", "firstName": "A"})),
    )
    .await;
    assert_eq!(missing_password.status(), StatusCode::BAD_REQUEST);
    assert_error_body(missing_password, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn login_returns_a_token_for_valid_credentials() {
    let app = test_app();
    register(&app, "a@x.com", "A").await;

    let res = request(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "a@x.com", "password": "pw123456"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_rejects_unknown_email_with_401() {
    let app = test_app();
    let res = request(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "nobody@x.com", "password": "pw123456"})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_wrong_password_with_401() {
    let app = test_app();
    register(&app, "a@x.com", "A").await;

    let res = request(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "a@x.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_malformed_payloads_with_400() {
    let app = test_app();

    let bad_email = request(
        app.clone(),
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "not-an-email", "password": "pw123456"})),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let missing_password = request(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"email": "a@x.com"})),
    )
    .await;
    assert_eq!(missing_password.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn issued_token_identifies_the_account() {
    let app = test_app();
    let token = register(&app, "a@x.com", "A").await;

    let res = request(app, Method::GET, "/user", Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["firstName"], "A");
}

#[tokio::test]
async fn unknown_paths_return_the_error_envelope() {
    let app = test_app();
    let res = request(app, Method::GET, "/no/such/route", None, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_error_body(res, StatusCode::NOT_FOUND).await;
}
