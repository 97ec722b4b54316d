use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditRecorder, AuditResult, TraceContext};
use crate::config::AppConfig;
use crate::greeting::generate_greeting;

/// Source label used when the caller does not provide one
pub const DEFAULT_SOURCE: &str = "api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetCommand {
    pub name: String,
    pub source: String,
    #[serde(skip)]
    pub trace: Option<TraceContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub version: String,
    pub audit_id: i64,
    /// Always serialized; `null` when the request carried no trace context
    pub trace_id: Option<String>,
}

/// Format the greeting and record it
///
/// The greeting text is computed once and stored as the audit message.
#[tracing::instrument(skip(recorder, app, command), fields(name = %command.name, source = %command.source))]
pub async fn handle(
    recorder: &AuditRecorder,
    app: &AppConfig,
    command: GreetCommand,
) -> AuditResult<GreetResponse> {
    let message = generate_greeting(&command.name, &app.greeting_prefix, &app.greeting_suffix);

    let audit = recorder
        .record(&command.name, &message, &command.source, command.trace)
        .await?;

    Ok(GreetResponse {
        message,
        timestamp: Utc::now(),
        environment: app.environment.clone(),
        version: app.version.clone(),
        audit_id: audit.id,
        trace_id: audit.trace_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditError, AuditStore, InMemoryAuditStore};
    use std::sync::Arc;

    fn setup() -> (AuditRecorder, Arc<InMemoryAuditStore>, AppConfig) {
        let store = Arc::new(InMemoryAuditStore::new());
        let app = AppConfig {
            environment: "test".to_string(),
            version: "9.9.9".to_string(),
            ..AppConfig::default()
        };
        (AuditRecorder::new(store.clone()), store, app)
    }

    fn command(name: &str, trace: Option<TraceContext>) -> GreetCommand {
        GreetCommand {
            name: name.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            trace,
        }
    }

    #[tokio::test]
    async fn test_handle_greets_and_records() {
        let (recorder, store, app) = setup();

        let response = handle(&recorder, &app, command("alice", None)).await.unwrap();

        assert_eq!(response.message, "Hello alice! Welcome to our service!");
        assert_eq!(response.environment, "test");
        assert_eq!(response.version, "9.9.9");
        assert!(response.trace_id.is_none());

        let records = store.find_by_name("alice").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, response.audit_id);
        assert_eq!(records[0].message.as_deref(), Some(response.message.as_str()));
        assert_eq!(records[0].request_source.as_deref(), Some("api"));
    }

    #[tokio::test]
    async fn test_handle_reports_trace_id() {
        let (recorder, _, app) = setup();
        let trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            span_id: "00f067aa0ba902b7".to_string(),
        };

        let response = handle(&recorder, &app, command("bob", Some(trace))).await.unwrap();

        assert_eq!(response.trace_id.as_deref(), Some("4bf92f3577b34da6a3ce929d0e0e4736"));
    }

    #[tokio::test]
    async fn test_handle_rejects_empty_name() {
        let (recorder, store, app) = setup();

        let result = handle(&recorder, &app, command("", None)).await;

        assert!(matches!(result, Err(AuditError::Validation(_))));
        assert!(store.is_empty().await);
    }
}
