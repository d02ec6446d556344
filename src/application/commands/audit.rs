// src/application/commands/audit.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::ClockPort,
};
use crate::domain::audit::{ActionTag, AuditRecordRepository, NewAuditRecord, RecordId};
use std::sync::Arc;

pub struct AuditCommandService {
    repo: Arc<dyn AuditRecordRepository>,
    clock: Arc<ClockPort>,
}

impl AuditCommandService {
    pub fn new(repo: Arc<dyn AuditRecordRepository>, clock: Arc<ClockPort>) -> Self {
        Self { repo, clock }
    }

    /// Append a record stamped with the current instant.
    pub async fn record(&self, email: &str, action: ActionTag) -> ApplicationResult<RecordId> {
        let record = NewAuditRecord::new(email, action, self.clock.now())?;
        let id = self.repo.append(record).await.map_err(ApplicationError::from)?;
        Ok(id)
    }

    /// Record after the external write already succeeded. A storage failure
    /// only leaves the trail incomplete, so it is logged and swallowed.
    pub async fn record_best_effort(&self, email: &str, action: ActionTag) -> Option<RecordId> {
        let tag = action.as_str().to_string();
        match self.record(email, action).await {
            Ok(id) => {
                tracing::info!(email, action = %tag, record_id = i64::from(id), "recorded customer action");
                Some(id)
            }
            Err(err) => {
                tracing::warn!(email, action = %tag, error = %err, "failed to record customer action");
                None
            }
        }
    }

    /// Irreversibly delete every record.
    pub async fn clear(&self) -> ApplicationResult<u64> {
        let deleted = self.repo.clear().await.map_err(ApplicationError::from)?;
        tracing::info!(deleted, "cleared audit records");
        Ok(deleted)
    }
}
