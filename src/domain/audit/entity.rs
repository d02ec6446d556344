// src/domain/audit/entity.rs
use crate::domain::audit::ActionTag;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

/// Surrogate key assigned by the store. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// One completed customer action. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: RecordId,
    pub recorded_at: DateTime<Utc>,
    pub email: String,
    pub action: ActionTag,
}

#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    pub email: String,
    pub action: ActionTag,
    pub recorded_at: DateTime<Utc>,
}

impl NewAuditRecord {
    pub fn new(
        email: impl Into<String>,
        action: ActionTag,
        recorded_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(DomainError::Validation(
                "audit record email cannot be empty".into(),
            ));
        }
        Ok(Self {
            email,
            action,
            recorded_at,
        })
    }
}
