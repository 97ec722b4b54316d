//! Audit statistics query

use serde::{Deserialize, Serialize};

use super::DEFAULT_WINDOW_HOURS;
use crate::audit::{self, AuditResult, AuditStatistics, AuditStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStatsQuery {
    /// Window size in hours (default: 24)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn AuditStore, query: AuditStatsQuery) -> AuditResult<AuditStatistics> {
    let hours = query.hours.unwrap_or(DEFAULT_WINDOW_HOURS);
    let stats = audit::get_statistics(store, hours).await?;

    tracing::info!(
        "Generated statistics for last {} hours: {} total requests",
        hours,
        stats.total_requests
    );

    Ok(stats)
}
