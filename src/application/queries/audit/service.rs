use std::sync::Arc;

use crate::application::ports::ClockPort;
use crate::domain::audit::AuditRecordRepository;

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditRecordRepository>,
    pub(super) clock: Arc<ClockPort>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditRecordRepository>, clock: Arc<ClockPort>) -> Self {
        Self { repo, clock }
    }
}
