use super::AuditQueryService;
use crate::{
    application::{
        dto::{ActionSummaryDto, AuditRecordView, ResultsDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::ActionTag,
};

impl AuditQueryService {
    /// Counts per tag, with `PAUSE`, `BBAU` and `UNSUBSCRIBE` always present.
    pub async fn summarize(&self) -> ApplicationResult<ActionSummaryDto> {
        let counts = self.repo.summarize().await.map_err(ApplicationError::from)?;
        let mut summary: std::collections::BTreeMap<String, u64> = counts
            .into_iter()
            .map(|(tag, count)| (tag.as_str().to_string(), count))
            .collect();
        for tag in ActionTag::summary_defaults() {
            summary.entry(tag.as_str().to_string()).or_insert(0);
        }
        Ok(ActionSummaryDto(summary))
    }

    /// Every record, newest first.
    pub async fn list_all(&self) -> ApplicationResult<Vec<AuditRecordView>> {
        let records = self.repo.list_all().await.map_err(ApplicationError::from)?;
        Ok(records.into_iter().map(AuditRecordView::from).collect())
    }

    pub async fn list_by_action(&self, action: &ActionTag) -> ApplicationResult<Vec<AuditRecordView>> {
        let records = self
            .repo
            .list_by_action(action)
            .await
            .map_err(ApplicationError::from)?;
        Ok(records.into_iter().map(AuditRecordView::from).collect())
    }

    pub async fn results(&self) -> ApplicationResult<ResultsDto> {
        let summary = self.summarize().await?;
        let records = self.list_all().await?;
        tracing::info!(records = records.len(), "loaded audit results");
        Ok(ResultsDto { summary, records })
    }
}
