//! Integration tests for the root-level health endpoint and the middleware
//! applied to every response.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Service health");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["db_healthy"], true);
    assert!(json.get("meta").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_security_headers_present(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("permissions-policy"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_id_is_assigned(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id should be set")
        .to_str()
        .expect("x-request-id should be ASCII");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_is_not_found(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "NOT_FOUND");
}
