// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{audit::AuditCommandService, preferences::PreferenceCommandService},
        ports::{ClockPort, CustomerAttributeApiPort},
        preferences::PreferenceAdapter,
        queries::audit::AuditQueryService,
        security::AdminGate,
    },
    domain::audit::AuditRecordRepository,
};

pub struct ApplicationServices {
    pub preference_commands: Arc<PreferenceCommandService>,
    pub audit_commands: Arc<AuditCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    admin_gate: AdminGate,
}

impl ApplicationServices {
    pub fn new(
        attribute_api: Arc<CustomerAttributeApiPort>,
        audit_repo: Arc<dyn AuditRecordRepository>,
        clock: Arc<ClockPort>,
        admin_gate: AdminGate,
    ) -> Self {
        let audit_commands = Arc::new(AuditCommandService::new(
            Arc::clone(&audit_repo),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&audit_repo),
            Arc::clone(&clock),
        ));
        let preference_commands = Arc::new(PreferenceCommandService::new(
            PreferenceAdapter::new(attribute_api),
            Arc::clone(&audit_commands),
        ));

        Self {
            preference_commands,
            audit_commands,
            audit_queries,
            admin_gate,
        }
    }

    pub const fn admin_gate(&self) -> &AdminGate {
        &self.admin_gate
    }
}
