#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use kredit_api::auth::jwt::JwtConfig;
use kredit_api::config::{LogFormat, ServerConfig};
use kredit_api::router::build_app_router;
use kredit_api::state::AppState;
use kredit_core::credit::TenorTable;

pub const PASSWORD: &str = "rahasia123";

/// Build a test `ServerConfig` with safe defaults and the default tenor table.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 15,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            access_secret: "test-access-secret-that-is-long-enough".to_string(),
            refresh_secret: "test-refresh-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_mins: 60,
        },
        tenor_limits: TenorTable::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same builder as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router should not fail")
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, json_request(Method::PATCH, uri, &body, Some(token))).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, raw: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .expect("request should build");
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Sign up through the API and return the envelope's `data`.
pub async fn signup(app: Router, email: &str, phone: &str) -> Value {
    let response = post_json(
        app,
        "/api/v1/customer/signup",
        json!({ "email": email, "phone": phone, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Sign in by email and return the token pair from the envelope's `data`.
pub async fn signin(app: Router, email: &str) -> Value {
    let response = post_json(
        app,
        "/api/v1/customer/signin",
        json!({ "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

/// Sign up and sign in, returning the access token.
pub async fn signed_in(app: Router, email: &str, phone: &str) -> String {
    signup(app.clone(), email, phone).await;
    let tokens = signin(app, email).await;
    tokens["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Internal id of a customer, looked up by email.
pub async fn customer_id(pool: &PgPool, email: &str) -> i64 {
    kredit_db::repositories::CustomerRepo::find_by_email(pool, email)
        .await
        .expect("lookup should succeed")
        .expect("customer should exist")
        .id
}
