pub mod audit;
pub mod customer;
pub mod errors;
pub mod preferences;

pub use audit::{ActionTag, AuditRecord, AuditRecordRepository, NewAuditRecord, RecordId};
pub use customer::{CustomerAction, CustomerIdentifier};
