use super::AuditQueryService;
use crate::application::{
    dto::{CsvExport, audit::DISPLAY_TIMEZONE},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::audit::ActionTag;

const CSV_HEADER: [&str; 3] = ["Date", "Email", "Action"];

impl AuditQueryService {
    /// CSV of every record with `action`, newest first. A tag with no records
    /// yields a header-only file.
    pub async fn export_csv(&self, action: &ActionTag) -> ApplicationResult<CsvExport> {
        let records = self.list_by_action(action).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| ApplicationError::infrastructure(format!("csv header: {e}")))?;
        for record in &records {
            writer
                .write_record([&record.date, &record.email, &record.action])
                .map_err(|e| ApplicationError::infrastructure(format!("csv row: {e}")))?;
        }
        let body = writer
            .into_inner()
            .map_err(|e| ApplicationError::infrastructure(format!("csv flush: {e}")))?;

        let date = self
            .clock
            .now()
            .with_timezone(&DISPLAY_TIMEZONE)
            .format("%Y-%m-%d");
        let filename = format!("{}_records_{date}.csv", action.as_str().to_lowercase());

        Ok(CsvExport {
            filename,
            body,
            rows: records.len(),
        })
    }
}
