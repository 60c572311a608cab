use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use moneyball::{
    app,
    config::{AppConfig, JwtConfig},
    AppState,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "postgres://unused".into(),
        jwt: JwtConfig {
            secret: "test-secret".into(),
            issuer: "moneyball-test".into(),
            ttl_minutes: 5,
        },
        // Never dialed by these tests; only /stats routes reach upstream.
        mlb_base_url: "http://127.0.0.1:1/api/v1".into(),
    }
}

/// Router over the in-memory store; each call is an isolated application.
pub fn test_app() -> Router {
    app(AppState::in_memory(test_config()))
}

pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn json_body(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers an account and returns its bearer token.
pub async fn register(app: &Router, email: &str, first_name: &str) -> String {
    let res = request(
        app.clone(),
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "pw123456",
            "firstName": first_name,
        })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    json_body(res).await["token"].as_str().unwrap().to_string()
}

/// Asserts the `{"error":{"message","status"}}` envelope.
pub async fn assert_error_body(res: Response<Body>, status: StatusCode) {
    let body = json_body(res).await;
    assert!(body["error"]["message"].is_string());
    assert_eq!(body["error"]["status"], status.as_u16());
}
