pub mod by_trace;
pub mod latest;
pub mod list;
pub mod stats;

pub use by_trace::ListTraceAuditsQuery;
pub use latest::GetLatestAuditError;
pub use list::ListAuditsQuery;
pub use stats::AuditStatsQuery;

/// Window used when a caller does not pass `hours`
pub const DEFAULT_WINDOW_HOURS: u32 = 24;
