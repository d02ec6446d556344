use crate::domain::audit::AuditRecord;
use chrono_tz::{Australia::Sydney, Tz};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Zone every admin-facing timestamp is rendered in.
pub const DISPLAY_TIMEZONE: Tz = Sydney;
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// One audit row as shown to administrators and written to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditRecordView {
    /// Recording instant in Australia/Sydney, e.g. `2024-01-01 11:00:00 AEDT`.
    pub date: String,
    pub email: String,
    pub action: String,
}

impl From<AuditRecord> for AuditRecordView {
    fn from(record: AuditRecord) -> Self {
        Self {
            date: record
                .recorded_at
                .with_timezone(&DISPLAY_TIMEZONE)
                .format(DISPLAY_FORMAT)
                .to_string(),
            email: record.email,
            action: record.action.as_str().to_string(),
        }
    }
}

/// Record counts per action tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ActionSummaryDto(pub BTreeMap<String, u64>);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultsDto {
    pub summary: ActionSummaryDto,
    pub records: Vec<AuditRecordView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub body: Vec<u8>,
    pub rows: usize,
}
