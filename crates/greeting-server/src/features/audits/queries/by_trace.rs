//! Audits by trace id

use serde::{Deserialize, Serialize};

use crate::audit::{AuditRecord, AuditResult, AuditStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTraceAuditsQuery {
    pub trace_id: String,
}

/// Records written under `trace_id`, most-recent-first
///
/// Trace ids are stored lowercased, so the lookup lowercases its input too.
pub async fn handle(
    store: &dyn AuditStore,
    query: ListTraceAuditsQuery,
) -> AuditResult<Vec<AuditRecord>> {
    let trace_id = query.trace_id.to_ascii_lowercase();
    let audits = store.find_by_trace_id(&trace_id).await?;

    tracing::debug!(trace_id = %trace_id, count = audits.len(), "Retrieved audits for trace");

    Ok(audits)
}
