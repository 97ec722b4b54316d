use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditError, AuditRecorder, TraceContext};
use crate::features::shared::payload::{self, JsonObject, PayloadError};

pub const ECHO_NAME: &str = "echo";
pub const ECHO_SOURCE: &str = "echo-endpoint";
pub const DEFAULT_ECHO_MESSAGE: &str = "Echo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoCommand {
    pub message: String,
    #[serde(skip)]
    pub trace: Option<TraceContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub echo: bool,
    pub audit_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum EchoError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl EchoCommand {
    /// Build from a loosely typed body; `message` defaults to `"Echo"`
    pub fn from_body(body: &JsonObject, trace: Option<TraceContext>) -> Self {
        Self {
            message: payload::string_field(body, "message")
                .unwrap_or_else(|| DEFAULT_ECHO_MESSAGE.to_string()),
            trace,
        }
    }
}

#[tracing::instrument(skip(recorder, command))]
pub async fn handle(recorder: &AuditRecorder, command: EchoCommand) -> Result<EchoResponse, EchoError> {
    tracing::info!("Echo request received: {}", command.message);

    let audit = recorder
        .record(ECHO_NAME, &command.message, ECHO_SOURCE, command.trace)
        .await?;

    Ok(EchoResponse {
        message: command.message,
        timestamp: Utc::now(),
        echo: true,
        audit_id: audit.id,
    })
}
