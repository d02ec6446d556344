// tests/support/mocks.rs
//! テスト用モック（属性API・監査ストア・時計）
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use email_preferences::application::{
    ApplicationResult, error::ApplicationError, ports::customer_attributes::CustomerAttributeApi,
    ports::time::Clock,
};
use email_preferences::domain::{
    CustomerIdentifier,
    audit::{ActionTag, AuditRecord, AuditRecordRepository, NewAuditRecord, RecordId},
    errors::{DomainError, DomainResult},
    preferences::CustomerUpdate,
};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

/// テスト用の固定タイムスタンプ
static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// 呼び出しごとに1秒進む時計。記録順を決定論的にする
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(fixed_now())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

/// Scripted outcome for one attribute API call.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok,
    Fail(&'static str),
}

/// Records every update and answers from a script; once the script is
/// exhausted every call succeeds.
#[derive(Default)]
pub struct RecordingAttributeApi {
    calls: Mutex<Vec<(String, CustomerUpdate)>>,
    script: Mutex<VecDeque<Reply>>,
}

impl RecordingAttributeApi {
    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(replies.into_iter().collect()),
        }
    }

    pub fn failing() -> Self {
        Self::scripted([Reply::Fail("500 Internal Server Error")])
    }

    pub fn calls(&self) -> Vec<(String, CustomerUpdate)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CustomerAttributeApi for RecordingAttributeApi {
    async fn update_customer(
        &self,
        identifier: &CustomerIdentifier,
        update: &CustomerUpdate,
    ) -> ApplicationResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((identifier.as_str().to_string(), update.clone()));
        let reply = self.script.lock().unwrap().pop_front().unwrap_or(Reply::Ok);
        match reply {
            Reply::Ok => Ok(()),
            Reply::Fail(reason) => Err(ApplicationError::external_api(reason)),
        }
    }
}

/// Vec-backed audit store with the same ordering rules as the SQLite one.
#[derive(Default)]
pub struct InMemoryAuditRepo {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditRepo {
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    fn sorted(mut records: Vec<AuditRecord>) -> Vec<AuditRecord> {
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(a.id.cmp(&b.id)));
        records
    }
}

#[async_trait]
impl AuditRecordRepository for InMemoryAuditRepo {
    async fn append(&self, record: NewAuditRecord) -> DomainResult<RecordId> {
        let mut records = self.records.lock().unwrap();
        let next = records.iter().map(|r| i64::from(r.id)).max().unwrap_or(0) + 1;
        let id = RecordId::new(next)?;
        records.push(AuditRecord {
            id,
            recorded_at: record.recorded_at,
            email: record.email,
            action: record.action,
        });
        Ok(id)
    }

    async fn summarize(&self) -> DomainResult<BTreeMap<ActionTag, u64>> {
        let mut counts = BTreeMap::new();
        for record in self.records.lock().unwrap().iter() {
            *counts.entry(record.action.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn list_all(&self) -> DomainResult<Vec<AuditRecord>> {
        Ok(Self::sorted(self.snapshot()))
    }

    async fn list_by_action(&self, action: &ActionTag) -> DomainResult<Vec<AuditRecord>> {
        let matching = self
            .snapshot()
            .into_iter()
            .filter(|r| &r.action == action)
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn clear(&self) -> DomainResult<u64> {
        let mut records = self.records.lock().unwrap();
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }
}

/// Store whose every operation fails, for best-effort recording paths.
pub struct BrokenAuditRepo;

#[async_trait]
impl AuditRecordRepository for BrokenAuditRepo {
    async fn append(&self, _record: NewAuditRecord) -> DomainResult<RecordId> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }

    async fn summarize(&self) -> DomainResult<BTreeMap<ActionTag, u64>> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }

    async fn list_all(&self) -> DomainResult<Vec<AuditRecord>> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }

    async fn list_by_action(&self, _action: &ActionTag) -> DomainResult<Vec<AuditRecord>> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }

    async fn clear(&self) -> DomainResult<u64> {
        Err(DomainError::Persistence("disk I/O error".into()))
    }
}
