//! Greeting API routes
//!
//! - `GET /api/greeting/:name?source=api` - Greet `name` and record an audit

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::commands::greet::{self, GreetCommand, GreetResponse, DEFAULT_SOURCE};
use crate::error::ApiResult;
use crate::features::FeatureState;
use crate::middleware::InboundTrace;

pub fn greeting_routes() -> Router<FeatureState> {
    Router::new().route("/greeting/:name", get(greeting))
}

#[derive(Debug, Deserialize)]
pub struct GreetingParams {
    pub source: Option<String>,
}

/// Greet a caller by name
///
/// # Endpoint
///
/// `GET /api/greeting/:name`
///
/// # Query Parameters
///
/// - `source` - Free-text request source label (default: `api`)
///
/// # Response
///
/// ```json
/// {
///   "message": "Hello alice! Welcome to our service!",
///   "timestamp": "2024-01-01T12:00:00Z",
///   "environment": "development",
///   "version": "1.0.0",
///   "auditId": 1,
///   "traceId": null
/// }
/// ```
///
/// - `200 OK` - Greeting returned and recorded
/// - `400 Bad Request` - Name or source exceeds the stored length limits
/// - `500 Internal Server Error` - Audit store failure
#[tracing::instrument(skip(state, params, trace), fields(name = %name))]
async fn greeting(
    State(state): State<FeatureState>,
    Path(name): Path<String>,
    params: Result<Query<GreetingParams>, QueryRejection>,
    InboundTrace(trace): InboundTrace,
) -> ApiResult<Json<GreetResponse>> {
    let Query(params) = params?;
    let source = params.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    tracing::info!("Greeting request received for: {} from source: {}", name, source);

    let command = GreetCommand { name, source, trace };
    let response = greet::handle(&state.recorder, &state.app, command).await?;

    Ok(Json(response))
}
