// src/infrastructure/repositories/mod.rs
mod error;
mod sqlite_audit_record;

pub(crate) use error::map_sqlx;
pub use sqlite_audit_record::SqliteAuditRecordRepository;
