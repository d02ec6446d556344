pub mod audit;
pub mod preferences;

pub use audit::{ActionSummaryDto, AuditRecordView, CsvExport, ResultsDto};
pub use preferences::ActionOutcome;
