//! Audit store abstraction
//!
//! The service only ever needs a handful of query shapes against the audit
//! table. [`AuditStore`] exposes exactly those, so the PostgreSQL store and the
//! in-memory store are interchangeable behind `Arc<dyn AuditStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{AuditRecord, NewAuditRecord};

/// Errors raised while writing or reading audit records
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Invalid audit record: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Audit store unavailable: {0}")]
    Unavailable(String),
}

pub type AuditResult<T> = Result<T, AuditError>;

/// Ordered, append-only collection of audit records
///
/// Every list query returns records most-recent-first.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist one record and return it with its id and creation time
    async fn insert(&self, record: NewAuditRecord) -> AuditResult<AuditRecord>;

    /// All records for `name`
    async fn find_by_name(&self, name: &str) -> AuditResult<Vec<AuditRecord>>;

    /// All records written under `trace_id`
    async fn find_by_trace_id(&self, trace_id: &str) -> AuditResult<Vec<AuditRecord>>;

    /// All records with `created_at >= since`
    async fn find_since(&self, since: DateTime<Utc>) -> AuditResult<Vec<AuditRecord>>;

    /// The record with the greatest `created_at`, ties broken by id
    async fn find_latest(&self) -> AuditResult<Option<AuditRecord>>;

    /// Mean `response_time_ms` over records with `created_at >= since`,
    /// `None` when there are none
    async fn average_response_time_since(&self, since: DateTime<Utc>) -> AuditResult<Option<f64>>;

    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> AuditResult<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
