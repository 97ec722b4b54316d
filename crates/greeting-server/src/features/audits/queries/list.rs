//! List audits query
//!
//! Returns every record for a name, or every record of the last `hours` hours
//! when no name is given. Results are most-recent-first.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::DEFAULT_WINDOW_HOURS;
use crate::audit::{window_start, AuditRecord, AuditResult, AuditStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAuditsQuery {
    /// Filter by exact name; takes precedence over `hours`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Window size in hours (default: 24)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn AuditStore, query: ListAuditsQuery) -> AuditResult<Vec<AuditRecord>> {
    match query.name {
        Some(name) => {
            let audits = store.find_by_name(&name).await?;
            tracing::info!("Retrieved {} audits for name: {}", audits.len(), name);
            Ok(audits)
        },
        None => {
            let hours = query.hours.unwrap_or(DEFAULT_WINDOW_HOURS);
            let audits = store.find_since(window_start(Utc::now(), hours)).await?;
            tracing::info!("Retrieved {} recent audits from last {} hours", audits.len(), hours);
            Ok(audits)
        },
    }
}
