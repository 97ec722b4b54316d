//! Audit statistics
//!
//! Reduces the audit records of a time window into an [`AuditStatistics`]
//! summary: counts per name, the most frequent name, distinct trace count and
//! average response time.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::models::{AuditRecord, AuditStatistics, NO_MOST_FREQUENT_NAME};
use super::store::{AuditResult, AuditStore};

/// 0001-01-01T00:00:00Z, well inside the range of a PostgreSQL `timestamptz`
const EARLIEST_WINDOW_START_SECS: i64 = -62_135_596_800;

/// Earliest lower bound a window may have
pub fn earliest_window_start() -> DateTime<Utc> {
    DateTime::from_timestamp(EARLIEST_WINDOW_START_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Start of a window reaching `hours` back from `now`
///
/// Clamped to [`earliest_window_start`] so every store can bind the bound.
pub fn window_start(now: DateTime<Utc>, hours: u32) -> DateTime<Utc> {
    let floor = earliest_window_start();
    now.checked_sub_signed(Duration::hours(i64::from(hours)))
        .map_or(floor, |start| start.max(floor))
}

/// Compute statistics for the last `hours` hours
///
/// The record list and the average come from two separate store queries over
/// the same lower bound. `period_end` is read from the clock after
/// `period_start`, so the two are not exactly `hours` apart.
pub async fn get_statistics(store: &dyn AuditStore, hours: u32) -> AuditResult<AuditStatistics> {
    let period_start = window_start(Utc::now(), hours);
    let period_end = Utc::now();

    let records = store.find_since(period_start).await?;
    let average = store.average_response_time_since(period_start).await?;

    let stats = summarize(&records, average, period_start, period_end);

    debug!(
        hours,
        total = stats.total_requests,
        unique_traces = stats.unique_traces,
        "Computed audit statistics"
    );

    Ok(stats)
}

/// Pure reduction of a fetched window
///
/// Ties for the most frequent name go to the lexicographically smallest name.
pub fn summarize(
    records: &[AuditRecord],
    average_response_time_ms: Option<f64>,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
) -> AuditStatistics {
    let mut requests_by_name: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        *requests_by_name.entry(record.name.clone()).or_insert(0) += 1;
    }

    let most_frequent_name = most_frequent(&requests_by_name)
        .unwrap_or(NO_MOST_FREQUENT_NAME)
        .to_string();

    let unique_traces = records
        .iter()
        .filter_map(|r| r.trace_id.as_deref())
        .collect::<HashSet<_>>()
        .len() as i64;

    AuditStatistics {
        total_requests: records.len() as i64,
        average_response_time_ms: average_response_time_ms.unwrap_or(0.0),
        requests_by_name,
        period_start,
        period_end,
        most_frequent_name,
        unique_traces,
    }
}

// BTreeMap iterates in key order and only a strictly greater count replaces
// the current best, so the first name reaching the maximum wins.
fn most_frequent(counts: &BTreeMap<String, i64>) -> Option<&str> {
    let mut best: Option<(&str, i64)> = None;
    for (name, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {},
            _ => best = Some((name.as_str(), count)),
        }
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::memory::InMemoryAuditStore;
    use crate::audit::models::{NewAuditRecord, TraceContext};

    fn record(id: i64, name: &str, trace_id: Option<&str>) -> AuditRecord {
        AuditRecord {
            id,
            name: name.to_string(),
            message: None,
            request_source: Some("api".to_string()),
            trace_id: trace_id.map(str::to_string),
            span_id: trace_id.map(|_| "00f067aa0ba902b7".to_string()),
            created_at: Utc::now(),
            response_time_ms: 0,
        }
    }

    fn summarize_now(records: &[AuditRecord], average: Option<f64>) -> AuditStatistics {
        let now = Utc::now();
        summarize(records, average, now - Duration::hours(24), now)
    }

    #[test]
    fn test_empty_window() {
        let stats = summarize_now(&[], None);

        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.average_response_time_ms, 0.0);
        assert_eq!(stats.most_frequent_name, "N/A");
        assert_eq!(stats.unique_traces, 0);
        assert!(stats.requests_by_name.is_empty());
    }

    #[test]
    fn test_counts_by_name() {
        let records = vec![
            record(1, "alice", None),
            record(2, "bob", None),
            record(3, "alice", None),
            record(4, "bob", None),
            record(5, "alice", None),
        ];

        let stats = summarize_now(&records, Some(12.5));

        assert_eq!(stats.total_requests, 5);
        assert_eq!(stats.requests_by_name.get("alice"), Some(&3));
        assert_eq!(stats.requests_by_name.get("bob"), Some(&2));
        assert_eq!(stats.most_frequent_name, "alice");
        assert_eq!(stats.average_response_time_ms, 12.5);
        assert_eq!(
            stats.requests_by_name.values().sum::<i64>(),
            stats.total_requests
        );
    }

    #[test]
    fn test_tie_goes_to_smallest_name() {
        let records = vec![
            record(1, "zoe", None),
            record(2, "mallory", None),
            record(3, "zoe", None),
            record(4, "mallory", None),
            record(5, "adam", None),
        ];

        let stats = summarize_now(&records, None);

        assert_eq!(stats.most_frequent_name, "mallory");
        let max = stats.requests_by_name.values().copied().max().unwrap();
        assert_eq!(stats.requests_by_name[&stats.most_frequent_name], max);
    }

    #[test]
    fn test_unique_traces_skip_missing_and_duplicates() {
        let records = vec![
            record(1, "alice", Some("trace-a")),
            record(2, "alice", Some("trace-a")),
            record(3, "bob", Some("trace-b")),
            record(4, "bob", None),
        ];

        let stats = summarize_now(&records, None);

        assert_eq!(stats.unique_traces, 2);
    }

    #[test]
    fn test_window_start_clamps_to_earliest_bound() {
        let now = Utc::now();
        assert_eq!(window_start(now, 0), now);
        assert_eq!(window_start(now, 2), now - Duration::hours(2));

        let floor = earliest_window_start();
        assert_eq!(floor.to_rfc3339(), "0001-01-01T00:00:00+00:00");
        assert_eq!(window_start(now, u32::MAX), floor);
        assert_eq!(window_start(now, 20_000_000), floor);
    }

    #[tokio::test]
    async fn test_get_statistics_respects_window() {
        let store = InMemoryAuditStore::new();
        let now = Utc::now();
        let trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            span_id: "00f067aa0ba902b7".to_string(),
        };

        for (name, ms) in [("alice", 10), ("alice", 20), ("alice", 30), ("bob", 40), ("bob", 50)] {
            store
                .insert(
                    NewAuditRecord::new(name, "hi", "api")
                        .with_response_time_ms(ms)
                        .with_trace(Some(trace.clone())),
                )
                .await
                .unwrap();
        }
        store
            .insert(
                NewAuditRecord::new("carol", "hi", "api")
                    .with_response_time_ms(9_999)
                    .with_created_at(now - Duration::hours(30)),
            )
            .await
            .unwrap();

        let stats = get_statistics(&store, 24).await.unwrap();

        assert_eq!(stats.total_requests, 5);
        assert_eq!(stats.most_frequent_name, "alice");
        assert_eq!(stats.requests_by_name.len(), 2);
        assert_eq!(stats.unique_traces, 1);
        assert!((stats.average_response_time_ms - 30.0).abs() < 1e-9);
        assert!(stats.period_start <= stats.period_end);

        let wide = get_statistics(&store, 48).await.unwrap();
        assert_eq!(wide.total_requests, 6);
    }

    #[tokio::test]
    async fn test_get_statistics_on_empty_store() {
        let store = InMemoryAuditStore::new();

        let stats = get_statistics(&store, 24).await.unwrap();

        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.average_response_time_ms, 0.0);
        assert_eq!(stats.most_frequent_name, "N/A");
        assert_eq!(stats.unique_traces, 0);
    }
}
