use super::map_sqlx;
use crate::domain::audit::{
    ActionTag, AuditRecord, AuditRecordRepository, NewAuditRecord, RecordId,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteAuditRecordRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAuditRecordRepository {
    pub const fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

/// `recorded_at` is stored as UTC unix milliseconds.
#[derive(Debug, FromRow)]
struct AuditRecordRow {
    id: i64,
    recorded_at: i64,
    email: String,
    action: String,
}

impl TryFrom<AuditRecordRow> for AuditRecord {
    type Error = DomainError;

    fn try_from(row: AuditRecordRow) -> Result<Self, Self::Error> {
        let recorded_at = DateTime::<Utc>::from_timestamp_millis(row.recorded_at).ok_or_else(|| {
            DomainError::Persistence(format!(
                "record {} has an out-of-range timestamp: {}",
                row.id, row.recorded_at
            ))
        })?;
        Ok(Self {
            id: RecordId::new(row.id)?,
            recorded_at,
            email: row.email,
            action: ActionTag::from_stored(&row.action),
        })
    }
}

#[derive(Debug, FromRow)]
struct ActionCountRow {
    action: String,
    count: i64,
}

fn into_records(rows: Vec<AuditRecordRow>) -> DomainResult<Vec<AuditRecord>> {
    rows.into_iter().map(AuditRecord::try_from).collect()
}

#[async_trait]
impl AuditRecordRepository for SqliteAuditRecordRepository {
    async fn append(&self, record: NewAuditRecord) -> DomainResult<RecordId> {
        let NewAuditRecord {
            email,
            action,
            recorded_at,
        } = record;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO email_processing_records (recorded_at, email, action) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(recorded_at.timestamp_millis())
        .bind(email)
        .bind(action.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        RecordId::new(id)
    }

    async fn summarize(&self) -> DomainResult<BTreeMap<ActionTag, u64>> {
        let rows = sqlx::query_as::<_, ActionCountRow>(
            "SELECT action, COUNT(*) AS count FROM email_processing_records GROUP BY action",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    ActionTag::from_stored(&row.action),
                    u64::try_from(row.count).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn list_all(&self) -> DomainResult<Vec<AuditRecord>> {
        let rows = sqlx::query_as::<_, AuditRecordRow>(
            "SELECT id, recorded_at, email, action FROM email_processing_records ORDER BY recorded_at DESC, id ASC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        into_records(rows)
    }

    async fn list_by_action(&self, action: &ActionTag) -> DomainResult<Vec<AuditRecord>> {
        let rows = sqlx::query_as::<_, AuditRecordRow>(
            "SELECT id, recorded_at, email, action FROM email_processing_records WHERE action = ? ORDER BY recorded_at DESC, id ASC",
        )
        .bind(action.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        into_records(rows)
    }

    async fn clear(&self) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM email_processing_records")
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }
}
