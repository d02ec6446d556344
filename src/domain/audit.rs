mod action;
pub mod entity;
pub mod repository;

pub use action::ActionTag;
pub use entity::{AuditRecord, NewAuditRecord, RecordId};
pub use repository::AuditRecordRepository;
