//! Integration tests for bearer token handling.

mod helpers;

use http::StatusCode;

use moments_auth::JwtEncoder;
use moments_core::config::AuthConfig;

use helpers::{ALICE, TestApp};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "connected");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::new().await;

    for (method, path) in [
        ("POST", "/api/routes"),
        ("GET", "/api/my-routes"),
        ("GET", "/api/my-shared-routes"),
        ("POST", "/api/shared-routes/abc/join"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.error_code(), "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_malformed_header_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(ALICE);

    let response = app
        .raw_request("GET", "/api/my-routes", String::new(), Some(format!("Token {token}")))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .raw_request("GET", "/api/my-routes", String::new(), Some("Bearer ".into()))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let token = app.expired_token_for(ALICE, 120);

    let response = app.request("GET", "/api/my-routes", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_signature_rejected() {
    let app = TestApp::new().await;
    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: "someone-else".into(),
        jwt_leeway_seconds: 0,
        access_ttl_minutes: 60,
    });
    let token = foreign.encode_access_token(ALICE, "Alice", "Tester").unwrap();

    let response = app.request("GET", "/api/my-routes", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_on_public_route_is_rejected() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let path = format!("/api/routes/{route_id}");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);

    let bad = app.request("GET", &path, None, Some("not-a-jwt")).await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_identifies_caller() {
    let app = TestApp::new().await;
    app.create_route(ALICE, "Coast").await;

    let response = app
        .request("GET", "/api/my-routes", None, Some(&app.token_for(ALICE)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()[0]["creatorId"], ALICE);
}
