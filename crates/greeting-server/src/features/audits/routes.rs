//! Audit API routes
//!
//! - `GET /api/audits?name=&hours=24` - Records for a name, or for a window
//! - `GET /api/audits/stats?hours=24` - Statistics for a window
//! - `GET /api/audits/latest` - Most recently created record
//! - `GET /api/audits/trace/:trace_id` - Records written under a trace

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use super::queries::{
    self, AuditStatsQuery, GetLatestAuditError, ListAuditsQuery, ListTraceAuditsQuery,
};
use crate::audit::{AuditRecord, AuditStatistics};
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn audits_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_audits))
        .route("/stats", get(audit_stats))
        .route("/latest", get(latest_audit))
        .route("/trace/:trace_id", get(trace_audits))
}

/// List audit records
///
/// # Endpoint
///
/// `GET /api/audits?name=alice` or `GET /api/audits?hours=24`
///
/// # Query Parameters
///
/// - `name` - Exact name filter; when present `hours` is ignored
/// - `hours` - Window size in hours (default: 24)
///
/// # Response
///
/// - `200 OK` - JSON array of audit records, most recent first
/// - `400 Bad Request` - Invalid query parameters
/// - `500 Internal Server Error` - Audit store failure
#[tracing::instrument(skip(state, query))]
async fn list_audits(
    State(state): State<FeatureState>,
    query: Result<Query<ListAuditsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AuditRecord>>> {
    let Query(query) = query?;
    let audits = queries::list::handle(state.store.as_ref(), query).await?;
    Ok(Json(audits))
}

/// Aggregate statistics over a window
///
/// # Endpoint
///
/// `GET /api/audits/stats?hours=24`
///
/// # Response
///
/// ```json
/// {
///   "totalRequests": 5,
///   "averageResponseTimeMs": 3.2,
///   "requestsByName": {"alice": 3, "bob": 2},
///   "periodStart": "2024-01-01T12:00:00Z",
///   "periodEnd": "2024-01-02T12:00:00Z",
///   "mostFrequentName": "alice",
///   "uniqueTraces": 2
/// }
/// ```
#[tracing::instrument(skip(state, query))]
async fn audit_stats(
    State(state): State<FeatureState>,
    query: Result<Query<AuditStatsQuery>, QueryRejection>,
) -> ApiResult<Json<AuditStatistics>> {
    let Query(query) = query?;
    let stats = queries::stats::handle(state.store.as_ref(), query).await?;
    Ok(Json(stats))
}

/// Most recently created audit record
///
/// # Endpoint
///
/// `GET /api/audits/latest`
///
/// # Response
///
/// - `200 OK` - The record
/// - `404 Not Found` - No records exist
#[tracing::instrument(skip(state))]
async fn latest_audit(State(state): State<FeatureState>) -> ApiResult<Json<AuditRecord>> {
    let latest = queries::latest::handle(state.store.as_ref()).await?;
    Ok(Json(latest))
}

/// Records carrying a trace id
///
/// # Endpoint
///
/// `GET /api/audits/trace/:trace_id`
///
/// # Response
///
/// - `200 OK` - JSON array of audit records, possibly empty
#[tracing::instrument(skip(state), fields(trace_id = %trace_id))]
async fn trace_audits(
    State(state): State<FeatureState>,
    Path(trace_id): Path<String>,
) -> ApiResult<Json<Vec<AuditRecord>>> {
    let audits =
        queries::by_trace::handle(state.store.as_ref(), ListTraceAuditsQuery { trace_id }).await?;
    Ok(Json(audits))
}

impl From<GetLatestAuditError> for AppError {
    fn from(err: GetLatestAuditError) -> Self {
        match err {
            GetLatestAuditError::NotFound => {
                AppError::NotFound("No audit records found".to_string())
            },
            GetLatestAuditError::Audit(e) => AppError::Store(e),
        }
    }
}
