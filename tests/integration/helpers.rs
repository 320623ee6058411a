//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use moments_api::{AppState, build_app};
use moments_auth::JwtEncoder;
use moments_core::config::AppConfig;
use moments_core::types::ManualClock;
use moments_database::{MemoryStore, UserStore};
use moments_entity::user::{AuthType, User};

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";
pub const CAROL: &str = "carol@example.com";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Clock driving share-token expiry
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over the in-memory store.
    pub async fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "auth": { "jwt_secret": "integration-test-secret", "jwt_leeway_seconds": 0 },
            "database": { "provider": "memory" },
            "uploads": {
                "provider": "direct",
                "direct_endpoint": "http://uploads.test",
                "cdn_domain": "https://cdn.test"
            }
        }))
        .expect("Failed to build test config");

        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let signer = moments_storage::build_upload_signer(&config.uploads)
            .await
            .expect("Failed to init upload signer");

        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            signer,
            clock.clone(),
        );

        Self {
            router: build_app(state),
            encoder: JwtEncoder::new(&config.auth),
            store,
            clock,
            config,
        }
    }

    /// Bearer token for `email`.
    pub fn token_for(&self, email: &str) -> String {
        let first = email.split('@').next().unwrap_or_default();
        self.encoder
            .encode_access_token(email, first, "Tester")
            .expect("Failed to sign token")
    }

    /// Bearer token for `email` that expired `seconds_ago` seconds ago.
    pub fn expired_token_for(&self, email: &str, seconds_ago: i64) -> String {
        self.encoder
            .encode_with_expiry(email, "Expired", "Tester", -seconds_ago)
            .expect("Failed to sign token")
    }

    /// Store a user profile so share-info can resolve it.
    pub async fn add_user(&self, email: &str, first_name: &str) {
        let user = User {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            google_id: None,
            auth_type: AuthType::Email,
        };
        self.store.upsert_user(&user).await.expect("Failed to add user");
    }

    /// Create a route owned by `email` and return its ID.
    pub async fn create_route(&self, email: &str, name: &str) -> String {
        let token = self.token_for(email);
        let response = self
            .request("POST", "/api/routes", Some(route_body(name)), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["_id"]
            .as_str()
            .expect("Route id missing")
            .to_string()
    }

    /// Share `route_id` as `owner` and return the minted token.
    pub async fn share(&self, owner: &str, route_id: &str, expiry_hours: Option<i64>) -> String {
        let token = self.token_for(owner);
        let body = expiry_hours.map(|h| json!({ "expiryHours": h }));
        let response = self
            .request(
                "POST",
                &format!("/api/routes/{route_id}/share"),
                body,
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.data()["shareToken"]
            .as_str()
            .expect("Share token missing")
            .to_string()
    }

    /// Join via `share_token` as `email`.
    pub async fn join(&self, email: &str, share_token: &str) -> TestResponse {
        let token = self.token_for(email);
        self.request(
            "POST",
            &format!("/api/shared-routes/{share_token}/join"),
            None,
            Some(&token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str, token.map(|t| format!("Bearer {t}")))
            .await
    }

    /// Make a request with a raw body and an arbitrary Authorization value.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<String>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Minimal route creation body.
pub fn route_body(name: &str) -> Value {
    json!({
        "name": name,
        "origin": { "lat": 12.97, "lng": 77.59, "name": "Bengaluru" },
        "destination": { "lat": 15.49, "lng": 73.82, "name": "Goa" },
        "intermediateWaypoints": [{ "lat": 14.47, "lng": 75.92, "name": "Davangere" }]
    })
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of a failure body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
