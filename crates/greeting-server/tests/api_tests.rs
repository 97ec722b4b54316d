//! API integration tests for the greeting server
//!
//! Drives the full router (middleware included) over the in-memory audit
//! store. Coverage:
//! - greeting, echo and simulate write paths and their audit records
//! - audit list, latest, trace lookup and statistics
//! - health, info and readiness
//! - error envelopes for bad input and the simulated failure

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::time::Instant;

mod helpers;

use helpers::{error_code, TestApp, TRACEPARENT, TRACE_ID};

// ============================================================================
// Greeting
// ============================================================================

#[tokio::test]
async fn test_greeting_returns_message_and_records_audit() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/greeting/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello alice! Welcome to our service!");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["version"], "1.2.3");
    assert!(body["timestamp"].is_string());
    assert!(body["traceId"].is_null());
    assert!(body.as_object().unwrap().contains_key("traceId"));

    let (_, audits) = app.get("/api/audits?name=alice").await;
    let audits = audits.as_array().unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0]["id"], body["auditId"]);
    assert_eq!(audits[0]["message"], body["message"]);
    assert_eq!(audits[0]["requestSource"], "api");
}

#[tokio::test]
async fn test_greeting_accepts_whitespace_name() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/greeting/%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello  ! Welcome to our service!");

    let (_, audits) = app.get("/api/audits?name=%20").await;
    let audits = audits.as_array().unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0]["name"], " ");
}

#[tokio::test]
async fn test_greeting_uses_source_parameter() {
    let app = TestApp::new();

    app.get("/api/greeting/bob?source=cli").await;

    let (_, audits) = app.get("/api/audits?name=bob").await;
    assert_eq!(audits[0]["requestSource"], "cli");
}

#[tokio::test]
async fn test_greeting_carries_trace_context() {
    let app = TestApp::new();

    let (status, body) = app.get_traced("/api/greeting/carol", TRACEPARENT).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["traceId"], TRACE_ID);

    let (_, audits) = app.get(&format!("/api/audits/trace/{}", TRACE_ID)).await;
    let audits = audits.as_array().unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0]["name"], "carol");
    assert_eq!(audits[0]["spanId"], "00f067aa0ba902b7");
}

#[tokio::test]
async fn test_malformed_traceparent_is_ignored() {
    let app = TestApp::new();

    let (status, body) = app.get_traced("/api/greeting/dave", "not-a-trace").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["traceId"].is_null());

    let (_, latest) = app.get("/api/audits/latest").await;
    assert!(latest["traceId"].is_null());
    assert!(latest["spanId"].is_null());
}

#[tokio::test]
async fn test_greeting_rejects_overlong_source() {
    let app = TestApp::new();
    let source = "s".repeat(101);

    let (status, body) = app.get(&format!("/api/greeting/erin?source={}", source)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
    assert!(app.store.is_empty().await);
}

// ============================================================================
// Audits
// ============================================================================

#[tokio::test]
async fn test_list_audits_defaults_to_recent_window() {
    let app = TestApp::new();
    for name in ["alice", "bob", "alice"] {
        app.get(&format!("/api/greeting/{}", name)).await;
    }

    let (status, body) = app.get("/api/audits").await;

    assert_eq!(status, StatusCode::OK);
    let audits = body.as_array().unwrap();
    assert_eq!(audits.len(), 3);
    let ids: Vec<i64> = audits.iter().map(|a| a["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_list_audits_rejects_bad_hours() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/audits?hours=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_latest_audit_not_found_when_empty() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/audits/latest").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_latest_audit_returns_newest() {
    let app = TestApp::new();
    app.get("/api/greeting/first").await;
    app.post("/api/echo", json!({"message": "last"})).await;

    let (status, body) = app.get("/api/audits/latest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "echo");
    assert_eq!(body["message"], "last");
    assert!(body["createdAt"].is_string());
    assert!(body["responseTimeMs"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_stats_counts_names() {
    let app = TestApp::new();
    for name in ["alice", "alice", "alice", "bob", "bob"] {
        app.get(&format!("/api/greeting/{}", name)).await;
    }
    app.get_traced("/api/greeting/bob", TRACEPARENT).await;

    let (status, body) = app.get("/api/audits/stats?hours=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRequests"], 6);
    assert_eq!(body["requestsByName"], json!({"alice": 3, "bob": 3}));
    assert_eq!(body["mostFrequentName"], "alice");
    assert_eq!(body["uniqueTraces"], 1);
    assert!(body["averageResponseTimeMs"].as_f64().unwrap() >= 0.0);
    assert!(body["periodStart"].is_string());
    assert!(body["periodEnd"].is_string());
}

#[tokio::test]
async fn test_stats_clamps_huge_window() {
    let app = TestApp::new();
    app.get("/api/greeting/alice").await;

    let (status, body) = app.get("/api/audits/stats?hours=4294967295").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRequests"], 1);
    assert_eq!(body["periodStart"], "0001-01-01T00:00:00Z");

    let (status, audits) = app.get("/api/audits?hours=4294967295").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audits.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/audits/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRequests"], 0);
    assert_eq!(body["averageResponseTimeMs"], 0.0);
    assert_eq!(body["mostFrequentName"], "N/A");
    assert_eq!(body["uniqueTraces"], 0);
    assert_eq!(body["requestsByName"], json!({}));
}

// ============================================================================
// Echo
// ============================================================================

#[tokio::test]
async fn test_echo_returns_message() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/echo", json!({"message": "ping"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ping");
    assert_eq!(body["echo"], true);
    assert!(body["auditId"].is_i64());

    let (_, audits) = app.get("/api/audits?name=echo").await;
    assert_eq!(audits[0]["requestSource"], "echo-endpoint");
}

#[tokio::test]
async fn test_echo_defaults_message() {
    let app = TestApp::new();

    let (_, body) = app.post("/api/echo", json!({"other": 1})).await;
    assert_eq!(body["message"], "Echo");

    let (status, body) = app.post_raw("/api/echo", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Echo");
}

#[tokio::test]
async fn test_echo_rejects_non_object_body() {
    let app = TestApp::new();

    let (status, body) = app.post_raw("/api/echo", "[1,2,3]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
    assert!(app.store.is_empty().await);
}

// ============================================================================
// Simulate
// ============================================================================

#[tokio::test]
async fn test_simulate_normal() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/simulate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scenario"], "normal");
    assert_eq!(body["delay"], 0);

    let (_, latest) = app.get("/api/audits/latest").await;
    assert_eq!(latest["name"], "simulation");
    assert_eq!(latest["message"], "Simulation: normal with delay 0ms");
    assert_eq!(latest["id"], body["auditId"]);
}

#[tokio::test]
async fn test_simulate_error_records_then_fails() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/simulate", json!({"scenario": "error"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "SIMULATED_ERROR");
    assert!(body.get("scenario").is_none());
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_simulate_rejects_non_numeric_delay() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/simulate", json!({"delay": "later"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_simulate_rejects_delay_above_limit() {
    let app = TestApp::new();

    let (status, _) = app.post("/api/simulate", json!({"delay": 10_001})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_simulate_slow_takes_delay_plus_three_seconds() {
    let app = TestApp::new();
    let started = Instant::now();

    let (status, body) = app
        .post("/api/simulate", json!({"scenario": "slow", "delay": "200"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["delay"], 200);
    assert!(started.elapsed() >= Duration::from_millis(3200));
}

// ============================================================================
// System
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "UP", "service": "greeting-service", "version": "1.2.3"}));
}

#[tokio::test]
async fn test_info() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "greeting-service");
    assert_eq!(body["environment"], "test");
    assert_eq!(
        body["features"],
        json!({
            "audit": true,
            "database": true,
            "migrations": true,
            "simulation": true,
            "statistics": true,
            "tracing": true
        })
    );
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "READY");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
