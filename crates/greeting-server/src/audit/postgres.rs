//! PostgreSQL-backed audit store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use super::models::{AuditRecord, NewAuditRecord};
use super::store::{AuditResult, AuditStore};

const AUDIT_COLUMNS: &str = "id, name, message, request_source, trace_id, span_id, \
                             created_at, response_time_ms";

/// Audit store over the `greeting_audit` table
#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

fn select_where(predicate: &str) -> String {
    format!(
        "SELECT {} FROM greeting_audit WHERE {} ORDER BY created_at DESC, id DESC",
        AUDIT_COLUMNS, predicate
    )
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn insert(&self, record: NewAuditRecord) -> AuditResult<AuditRecord> {
        let (trace_id, span_id) = match record.trace {
            Some(trace) => (Some(trace.trace_id), Some(trace.span_id)),
            None => (None, None),
        };

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO greeting_audit (
                name, message, request_source, trace_id, span_id,
                response_time_ms, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7::timestamptz, NOW()))
            RETURNING {}
            "#,
            AUDIT_COLUMNS
        );

        let saved = sqlx::query_as::<_, AuditRecord>(&sql)
            .bind(&record.name)
            .bind(&record.message)
            .bind(&record.request_source)
            .bind(trace_id)
            .bind(span_id)
            .bind(record.response_time_ms)
            .bind(record.created_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(audit_id = saved.id, name = %saved.name, "Inserted audit record");

        Ok(saved)
    }

    async fn find_by_name(&self, name: &str) -> AuditResult<Vec<AuditRecord>> {
        let records = sqlx::query_as::<_, AuditRecord>(&select_where("name = $1"))
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_by_trace_id(&self, trace_id: &str) -> AuditResult<Vec<AuditRecord>> {
        let records = sqlx::query_as::<_, AuditRecord>(&select_where("trace_id = $1"))
            .bind(trace_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_since(&self, since: DateTime<Utc>) -> AuditResult<Vec<AuditRecord>> {
        let records = sqlx::query_as::<_, AuditRecord>(&select_where("created_at >= $1"))
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_latest(&self) -> AuditResult<Option<AuditRecord>> {
        let sql = format!(
            "SELECT {} FROM greeting_audit ORDER BY created_at DESC, id DESC LIMIT 1",
            AUDIT_COLUMNS
        );

        let record = sqlx::query_as::<_, AuditRecord>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn average_response_time_since(&self, since: DateTime<Utc>) -> AuditResult<Option<f64>> {
        let average: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(response_time_ms)::DOUBLE PRECISION
            FROM greeting_audit
            WHERE created_at >= $1
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }

    async fn ping(&self) -> AuditResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
