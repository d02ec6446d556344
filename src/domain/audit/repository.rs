// src/domain/audit/repository.rs
use crate::domain::audit::{ActionTag, AuditRecord, NewAuditRecord, RecordId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Append-only store of customer actions.
///
/// Listings are ordered by `recorded_at` descending with ties broken by
/// ascending id, so `list_by_action` is always a subsequence of `list_all`.
#[async_trait]
pub trait AuditRecordRepository: Send + Sync {
    async fn append(&self, record: NewAuditRecord) -> DomainResult<RecordId>;

    /// Count per tag present in the store. Tags with no rows are absent.
    async fn summarize(&self) -> DomainResult<BTreeMap<ActionTag, u64>>;

    async fn list_all(&self) -> DomainResult<Vec<AuditRecord>>;

    /// Empty when nothing matches.
    async fn list_by_action(&self, action: &ActionTag) -> DomainResult<Vec<AuditRecord>>;

    /// Delete every record and return how many were removed.
    async fn clear(&self) -> DomainResult<u64>;
}
