//! Latest audit query

use crate::audit::{AuditError, AuditRecord, AuditStore};

#[derive(Debug, thiserror::Error)]
pub enum GetLatestAuditError {
    #[error("No audit records found")]
    NotFound,
    #[error(transparent)]
    Audit(#[from] AuditError),
}

pub async fn handle(store: &dyn AuditStore) -> Result<AuditRecord, GetLatestAuditError> {
    store.find_latest().await?.ok_or(GetLatestAuditError::NotFound)
}
