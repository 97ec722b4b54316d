pub mod queries;
pub mod routes;

pub use queries::{
    AuditStatsQuery, GetLatestAuditError, ListAuditsQuery, ListTraceAuditsQuery,
    DEFAULT_WINDOW_HOURS,
};
pub use routes::audits_routes;
