//! Shared helpers for greeting-server integration tests
//!
//! Builds the full router over an in-memory audit store and wraps
//! `tower::ServiceExt::oneshot` for JSON requests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use greeting_server::{
    api,
    audit::InMemoryAuditStore,
    config::{AppConfig, CorsConfig},
    features::FeatureState,
};

pub const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";
pub const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryAuditStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_app_config())
    }

    pub fn with_config(app: AppConfig) -> Self {
        let store = Arc::new(InMemoryAuditStore::new());
        let state = FeatureState::new(store.clone(), app);
        let cors = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
        };

        Self {
            router: api::create_router(state, &cors),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_traced(&self, uri: &str, traceparent: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header("traceparent", traceparent)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }
}

pub fn test_app_config() -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        version: "1.2.3".to_string(),
        greeting_prefix: "Hello".to_string(),
        greeting_suffix: "Welcome to our service!".to_string(),
        simulate_max_delay_ms: 10_000,
    }
}

/// Assert the standard error envelope and return its code
pub fn error_code(body: &Value) -> &str {
    assert_eq!(body["success"], false, "not an error envelope: {}", body);
    body["error"]["code"].as_str().unwrap()
}
