// src/application/commands/preferences.rs
use crate::application::{
    ApplicationResult,
    commands::audit::AuditCommandService,
    dto::ActionOutcome,
    error::ApplicationError,
    preferences::PreferenceAdapter,
};
use crate::domain::{
    CustomerAction, CustomerIdentifier,
    audit::ActionTag,
    preferences::{BrandKey, SubscriptionChoice},
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UpdateSubscriptionsCommand {
    pub email: String,
    /// Attribute name to `"true"`, `"false"` or `"none"`.
    pub subscriptions: HashMap<String, String>,
}

/// Customer-facing preference changes: one attribute API operation per call,
/// followed by a best-effort audit record when that operation succeeds.
pub struct PreferenceCommandService {
    adapter: PreferenceAdapter,
    audit: Arc<AuditCommandService>,
}

impl PreferenceCommandService {
    pub fn new(adapter: PreferenceAdapter, audit: Arc<AuditCommandService>) -> Self {
        Self { adapter, audit }
    }

    pub async fn apply_action(
        &self,
        email: &str,
        action: CustomerAction,
    ) -> ApplicationResult<ActionOutcome> {
        let email = CustomerIdentifier::new(email)?;
        tracing::info!(email = %email, action = %action, "processing customer action");

        let result = match action {
            CustomerAction::Pause => self.adapter.set_paused(&email, true).await,
            CustomerAction::Unpause => self.adapter.set_paused(&email, false).await,
            CustomerAction::International => self.adapter.move_to_international_list(&email).await,
            CustomerAction::Unsubscribe => self.adapter.unsubscribe(&email).await,
        };
        result.map_err(|err| customer_facing(action.as_str(), &email, err))?;

        self.audit
            .record_best_effort(email.as_str(), action.audit_tag())
            .await;

        let message = match action {
            CustomerAction::Pause => format!("Customer ({email}) has been paused."),
            CustomerAction::Unpause => format!("Customer ({email}) has been unpaused."),
            CustomerAction::International => {
                format!("Customer ({email}) moved to Australian/International list.")
            }
            CustomerAction::Unsubscribe => format!("Customer ({email}) has been unsubscribed."),
        };
        Ok(ActionOutcome::succeeded(message))
    }

    /// Pause link from older campaigns that carries the platform customer id
    /// instead of an email address.
    pub async fn pause_legacy(&self, customer_id: &str) -> ApplicationResult<ActionOutcome> {
        let id = CustomerIdentifier::new(customer_id)?;
        tracing::info!(customer_id = %id, "processing legacy pause");

        self.adapter
            .set_paused(&id, true)
            .await
            .map_err(|err| customer_facing("pause", &id, err))?;

        self.audit
            .record_best_effort(id.as_str(), ActionTag::Pause)
            .await;
        Ok(ActionOutcome::succeeded(format!(
            "Customer (ID: {id}) has been paused."
        )))
    }

    pub async fn update_subscriptions(
        &self,
        command: UpdateSubscriptionsCommand,
    ) -> ApplicationResult<ActionOutcome> {
        let email = CustomerIdentifier::new(command.email)?;
        let subscriptions = command
            .subscriptions
            .into_iter()
            .map(|(key, value)| -> ApplicationResult<(BrandKey, SubscriptionChoice)> {
                Ok((BrandKey::new(key)?, value.parse::<SubscriptionChoice>()?))
            })
            .collect::<ApplicationResult<BTreeMap<_, _>>>()?;
        tracing::info!(email = %email, count = subscriptions.len(), "updating subscriptions");

        self.adapter
            .update_subscriptions(&email, &subscriptions)
            .await
            .map_err(|err| customer_facing("subscription update", &email, err))?;

        self.audit
            .record_best_effort(email.as_str(), ActionTag::SubscriptionUpdate)
            .await;
        Ok(ActionOutcome::succeeded("Subscriptions updated successfully"))
    }

    pub async fn unsubscribe_all(&self, email: &str) -> ApplicationResult<ActionOutcome> {
        let email = CustomerIdentifier::new(email)?;
        tracing::info!(email = %email, "unsubscribing from all brands");

        self.adapter
            .unsubscribe_all_brands(&email)
            .await
            .map_err(|err| customer_facing("unsubscribe", &email, err))?;

        self.audit
            .record_best_effort(email.as_str(), ActionTag::UnsubscribeAll)
            .await;
        Ok(ActionOutcome::succeeded(
            "Unsubscribed from all brands successfully",
        ))
    }
}

/// Log the full failure and hand back a message safe to show a customer.
fn customer_facing(
    label: &str,
    identifier: &CustomerIdentifier,
    err: ApplicationError,
) -> ApplicationError {
    tracing::error!(identifier = %identifier, operation = label, error = %err, "preference update failed");
    match err {
        ApplicationError::ExternalApi(_) => ApplicationError::ExternalApi(format!(
            "Error processing {label} request. Check logs."
        )),
        ApplicationError::PartialMove(_) => ApplicationError::PartialMove(format!(
            "Error processing {label} request; it is safe to try again."
        )),
        other => other,
    }
}
