//! Simulate API routes
//!
//! - `POST /api/simulate` - Induce latency or a failure

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::commands::simulate::{self, SimulateCommand, SimulateError, SimulateResponse};
use crate::error::{ApiResult, AppError};
use crate::features::shared::parse_object;
use crate::features::FeatureState;
use crate::middleware::InboundTrace;

pub fn simulate_routes() -> Router<FeatureState> {
    Router::new().route("/simulate", post(run_simulation))
}

/// Simulate a scenario
///
/// # Endpoint
///
/// `POST /api/simulate`
///
/// # Request Body
///
/// ```json
/// { "scenario": "slow", "delay": 250 }
/// ```
///
/// - `scenario` - `normal` (default), `slow` (extra 3s) or `error`
/// - `delay` - Milliseconds to wait first (default: 0, integer or numeric string)
///
/// # Response
///
/// - `200 OK` - `{"scenario", "delay", "timestamp", "auditId"}`
/// - `400 Bad Request` - Malformed body, non-integer delay or delay above the limit
/// - `500 Internal Server Error` - `error` scenario or audit store failure
#[tracing::instrument(skip(state, trace, body))]
async fn run_simulation(
    State(state): State<FeatureState>,
    InboundTrace(trace): InboundTrace,
    body: Bytes,
) -> ApiResult<Json<SimulateResponse>> {
    let body = parse_object(&body).map_err(SimulateError::from)?;
    let command = SimulateCommand::from_body(&body, trace)?;

    let response = simulate::handle(&state.recorder, state.app.simulate_max_delay_ms, command).await?;

    Ok(Json(response))
}

impl From<SimulateError> for AppError {
    fn from(err: SimulateError) -> Self {
        match err {
            SimulateError::Payload(e) => AppError::BadRequest(e.to_string()),
            SimulateError::DelayTooLong { .. } => AppError::BadRequest(err.to_string()),
            SimulateError::Simulated => AppError::SimulatedFailure(err.to_string()),
            SimulateError::Audit(e) => AppError::Store(e),
        }
    }
}
