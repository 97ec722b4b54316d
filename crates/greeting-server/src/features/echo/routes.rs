//! Echo API routes
//!
//! - `POST /api/echo` - Echo a message back and record it

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::commands::echo::{self, EchoCommand, EchoError, EchoResponse};
use crate::error::{ApiResult, AppError};
use crate::features::shared::parse_object;
use crate::features::FeatureState;
use crate::middleware::InboundTrace;

pub fn echo_routes() -> Router<FeatureState> {
    Router::new().route("/echo", post(echo_message))
}

/// Echo a message
///
/// # Endpoint
///
/// `POST /api/echo`
///
/// # Request Body
///
/// ```json
/// { "message": "ping" }
/// ```
///
/// Any JSON object is accepted; `message` defaults to `"Echo"`.
///
/// # Response
///
/// - `200 OK` - `{"message", "timestamp", "echo": true, "auditId"}`
/// - `400 Bad Request` - Body is not a JSON object or the message is too long
/// - `500 Internal Server Error` - Audit store failure
#[tracing::instrument(skip(state, trace, body))]
async fn echo_message(
    State(state): State<FeatureState>,
    InboundTrace(trace): InboundTrace,
    body: Bytes,
) -> ApiResult<Json<EchoResponse>> {
    let body = parse_object(&body).map_err(EchoError::from)?;
    let command = EchoCommand::from_body(&body, trace);

    let response = echo::handle(&state.recorder, command).await?;

    Ok(Json(response))
}

impl From<EchoError> for AppError {
    fn from(err: EchoError) -> Self {
        match err {
            EchoError::Payload(e) => AppError::BadRequest(e.to_string()),
            EchoError::Audit(e) => AppError::Store(e),
        }
    }
}
