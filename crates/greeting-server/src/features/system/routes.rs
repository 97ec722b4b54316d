//! System API routes
//!
//! - `GET /api/health` - Liveness, never touches the store
//! - `GET /api/info` - Service labels and feature flags
//! - `GET /api/ready` - Readiness, pings the audit store

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SERVICE_NAME;
use crate::features::FeatureState;

pub const STATUS_UP: &str = "UP";
pub const STATUS_READY: &str = "READY";
pub const STATUS_NOT_READY: &str = "NOT_READY";

/// Capabilities reported by `/api/info`
const FEATURES: [&str; 6] = [
    "tracing",
    "database",
    "migrations",
    "audit",
    "statistics",
    "simulation",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
    pub features: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
}

pub fn system_routes() -> Router<FeatureState> {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/ready", get(ready))
}

async fn health(State(state): State<FeatureState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_UP.to_string(),
        service: SERVICE_NAME.to_string(),
        version: state.app.version.clone(),
    })
}

async fn info(State(state): State<FeatureState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        service: SERVICE_NAME.to_string(),
        version: state.app.version.clone(),
        environment: state.app.environment.clone(),
        timestamp: Utc::now(),
        features: FEATURES.iter().map(|f| (f.to_string(), true)).collect(),
    })
}

async fn ready(State(state): State<FeatureState>) -> (StatusCode, Json<ReadyResponse>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: STATUS_READY.to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!(store = state.store.name(), "Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: STATUS_NOT_READY.to_string(),
                }),
            )
        },
    }
}
