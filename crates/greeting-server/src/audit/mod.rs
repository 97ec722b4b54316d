//! Audit trail
//!
//! Every greeting, echo and simulate request leaves one [`AuditRecord`]
//! behind. This module owns the record types, the [`AuditStore`] repository
//! trait with its PostgreSQL and in-memory implementations, the
//! [`AuditRecorder`] that writes records, and the statistics aggregation over
//! a time window.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use greeting_server::audit::{self, AuditRecorder, InMemoryAuditStore};
//!
//! # async fn example() -> Result<(), audit::AuditError> {
//! let store = Arc::new(InMemoryAuditStore::new());
//! let recorder = AuditRecorder::new(store.clone());
//!
//! let record = recorder.record("alice", "Hello alice!", "api", None).await?;
//! let stats = audit::get_statistics(store.as_ref(), 24).await?;
//! assert_eq!(stats.total_requests, 1);
//! # let _ = record;
//! # Ok(())
//! # }
//! ```

mod memory;
mod models;
mod postgres;
mod recorder;
mod stats;
mod store;

pub use memory::InMemoryAuditStore;
pub use models::{
    AuditRecord, AuditStatistics, NewAuditRecord, TraceContext, MAX_MESSAGE_LENGTH,
    MAX_NAME_LENGTH, MAX_SOURCE_LENGTH, NO_MOST_FREQUENT_NAME,
};
pub use postgres::PgAuditStore;
pub use recorder::AuditRecorder;
pub use stats::{earliest_window_start, get_statistics, summarize, window_start};
pub use store::{AuditError, AuditResult, AuditStore};
