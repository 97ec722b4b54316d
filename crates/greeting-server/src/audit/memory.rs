//! In-memory audit store
//!
//! Used for `AUDIT_STORE=memory` and throughout the tests. Records live only
//! as long as the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::models::{AuditRecord, NewAuditRecord};
use super::store::{AuditResult, AuditStore};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: Vec<AuditRecord>,
}

/// Audit store holding records in a vector behind an async lock
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    inner: RwLock<Inner>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn collect_newest_first<F>(&self, predicate: F) -> Vec<AuditRecord>
    where
        F: Fn(&AuditRecord) -> bool,
    {
        let inner = self.inner.read().await;
        let mut matches: Vec<AuditRecord> =
            inner.records.iter().filter(|r| predicate(r)).cloned().collect();
        sort_newest_first(&mut matches);
        matches
    }
}

fn sort_newest_first(records: &mut [AuditRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn insert(&self, record: NewAuditRecord) -> AuditResult<AuditRecord> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let (trace_id, span_id) = match record.trace {
            Some(trace) => (Some(trace.trace_id), Some(trace.span_id)),
            None => (None, None),
        };

        let saved = AuditRecord {
            id: inner.next_id,
            name: record.name,
            message: Some(record.message),
            request_source: Some(record.request_source),
            trace_id,
            span_id,
            created_at: record.created_at.unwrap_or_else(Utc::now),
            response_time_ms: record.response_time_ms,
        };

        inner.records.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_name(&self, name: &str) -> AuditResult<Vec<AuditRecord>> {
        Ok(self.collect_newest_first(|r| r.name == name).await)
    }

    async fn find_by_trace_id(&self, trace_id: &str) -> AuditResult<Vec<AuditRecord>> {
        Ok(self
            .collect_newest_first(|r| r.trace_id.as_deref() == Some(trace_id))
            .await)
    }

    async fn find_since(&self, since: DateTime<Utc>) -> AuditResult<Vec<AuditRecord>> {
        Ok(self.collect_newest_first(|r| r.created_at >= since).await)
    }

    async fn find_latest(&self) -> AuditResult<Option<AuditRecord>> {
        let inner = self.inner.read().await;
        let latest = inner
            .records
            .iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned();
        Ok(latest)
    }

    async fn average_response_time_since(&self, since: DateTime<Utc>) -> AuditResult<Option<f64>> {
        let inner = self.inner.read().await;
        let (sum, count) = inner
            .records
            .iter()
            .filter(|r| r.created_at >= since)
            .fold((0i128, 0u64), |(sum, count), r| (sum + r.response_time_ms as i128, count + 1));

        if count == 0 {
            return Ok(None);
        }
        Ok(Some(sum as f64 / count as f64))
    }

    async fn ping(&self) -> AuditResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
