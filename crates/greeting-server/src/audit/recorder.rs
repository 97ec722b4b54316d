//! Audit recorder
//!
//! Builds one audit record per handled request and persists it.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::models::{AuditRecord, NewAuditRecord, TraceContext};
use super::store::{AuditError, AuditResult, AuditStore};

/// Writes audit records through an [`AuditStore`]
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Record one event and return the persisted row
    ///
    /// `trace` is whatever context the caller managed to extract; an absent
    /// or unreadable context simply produces a record without trace ids.
    /// Validation happens before anything is written. Store failures are
    /// returned unchanged and nothing is retried.
    #[tracing::instrument(
        skip(self, message, source, trace),
        fields(source = %source, traced = trace.is_some())
    )]
    pub async fn record(
        &self,
        name: &str,
        message: &str,
        source: &str,
        trace: Option<TraceContext>,
    ) -> AuditResult<AuditRecord> {
        let started = Instant::now();

        let mut record = NewAuditRecord::new(name, message, source).with_trace(trace);
        record.validate().map_err(AuditError::Validation)?;
        record.response_time_ms = elapsed_ms(started);

        let saved = self.store.insert(record).await?;

        debug!(
            audit_id = saved.id,
            insert_ms = elapsed_ms(started),
            store = self.store.name(),
            "Audit insert completed"
        );
        info!(
            audit_id = saved.id,
            trace_id = saved.trace_id.as_deref().unwrap_or("-"),
            "Recorded audit for name: {}",
            saved.name
        );

        Ok(saved)
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
}
