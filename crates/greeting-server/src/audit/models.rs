//! Audit data models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Column Limits
// ============================================================================

/// Maximum length of the audited subject name (characters).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of the stored message (characters).
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Maximum length of the request source label (characters).
pub const MAX_SOURCE_LENGTH: usize = 100;

/// Sentinel reported as the most frequent name when a window is empty.
pub const NO_MOST_FREQUENT_NAME: &str = "N/A";

/// One persisted audit row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Store-assigned, monotonically increasing identifier
    pub id: i64,
    pub name: String,
    pub message: Option<String>,
    pub request_source: Option<String>,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    /// Set once when the row is created
    pub created_at: DateTime<Utc>,
    pub response_time_ms: i64,
}

impl AuditRecord {
    /// Trace context this record was written under, if any
    pub fn trace_context(&self) -> Option<TraceContext> {
        match (&self.trace_id, &self.span_id) {
            (Some(trace_id), Some(span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                span_id: span_id.clone(),
            }),
            _ => None,
        }
    }
}

/// Trace and span identifiers of the request that produced a record
///
/// Modelled as a single value so a record can never carry one id without
/// the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

/// A record that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditRecord {
    pub name: String,
    pub message: String,
    pub request_source: String,
    pub trace: Option<TraceContext>,
    pub response_time_ms: i64,
    /// Explicit creation time; the store assigns "now" when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl NewAuditRecord {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        request_source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            request_source: request_source.into(),
            trace: None,
            response_time_ms: 0,
            created_at: None,
        }
    }

    pub fn with_trace(mut self, trace: Option<TraceContext>) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_response_time_ms(mut self, response_time_ms: i64) -> Self {
        self.response_time_ms = response_time_ms;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Check the record against the column limits of the audit table
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        check_length("name", &self.name, MAX_NAME_LENGTH)?;
        check_length("message", &self.message, MAX_MESSAGE_LENGTH)?;
        check_length("source", &self.request_source, MAX_SOURCE_LENGTH)?;
        Ok(())
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max {
        return Err(format!("{} must be at most {} characters (got {})", field, max, len));
    }
    Ok(())
}

/// Aggregate view over the audit records in a time window
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStatistics {
    pub total_requests: i64,
    pub average_response_time_ms: f64,
    pub requests_by_name: BTreeMap<String, i64>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub most_frequent_name: String,
    pub unique_traces: i64,
}
