// src/application/preferences.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::CustomerAttributeApiPort,
};
use crate::domain::{
    CustomerIdentifier,
    preferences::{
        AttributePatch, BrandKey, CustomerUpdate, INTERNATIONAL_LIST, PAUSED_ATTRIBUTE,
        RelationshipAction, RelationshipChange, SubscriptionChoice, UNSUBSCRIBED_ATTRIBUTE,
        US_LIST,
    },
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Translates customer preference changes into attribute API writes.
#[derive(Clone)]
pub struct PreferenceAdapter {
    api: Arc<CustomerAttributeApiPort>,
}

impl PreferenceAdapter {
    pub fn new(api: Arc<CustomerAttributeApiPort>) -> Self {
        Self { api }
    }

    pub async fn set_paused(
        &self,
        identifier: &CustomerIdentifier,
        paused: bool,
    ) -> ApplicationResult<()> {
        let update = CustomerUpdate::Attributes(AttributePatch::new().set(PAUSED_ATTRIBUTE, paused));
        self.api.update_customer(identifier, &update).await
    }

    /// Remove the US list relationship, then add the international one.
    ///
    /// A failed removal stops before the second call. A failed add after a
    /// successful removal is reported as [`ApplicationError::PartialMove`]; both
    /// steps are idempotent so the whole move can be re-run.
    pub async fn move_to_international_list(
        &self,
        email: &CustomerIdentifier,
    ) -> ApplicationResult<()> {
        let remove = CustomerUpdate::Relationships(RelationshipChange::list(
            RelationshipAction::Delete,
            US_LIST,
        ));
        self.api.update_customer(email, &remove).await?;

        let add = CustomerUpdate::Relationships(RelationshipChange::list(
            RelationshipAction::Add,
            INTERNATIONAL_LIST,
        ));
        if let Err(err) = self.api.update_customer(email, &add).await {
            tracing::warn!(
                email = %email,
                error = %err,
                "removed {US_LIST} relationship but failed to add {INTERNATIONAL_LIST}; customer is on neither list"
            );
            return Err(ApplicationError::PartialMove(format!(
                "removed {US_LIST} but could not add {INTERNATIONAL_LIST}: {err}"
            )));
        }
        Ok(())
    }

    pub async fn unsubscribe(&self, email: &CustomerIdentifier) -> ApplicationResult<()> {
        let update =
            CustomerUpdate::Attributes(AttributePatch::new().set(UNSUBSCRIBED_ATTRIBUTE, true));
        self.api.update_customer(email, &update).await
    }

    pub async fn update_subscriptions(
        &self,
        email: &CustomerIdentifier,
        subscriptions: &BTreeMap<BrandKey, SubscriptionChoice>,
    ) -> ApplicationResult<()> {
        if subscriptions.is_empty() {
            return Err(ApplicationError::validation(
                "at least one subscription must be supplied",
            ));
        }
        let update = CustomerUpdate::Attributes(AttributePatch::for_subscriptions(subscriptions));
        self.api.update_customer(email, &update).await
    }

    pub async fn unsubscribe_all_brands(&self, email: &CustomerIdentifier) -> ApplicationResult<()> {
        let update = CustomerUpdate::Attributes(AttributePatch::unsubscribe_all());
        self.api.update_customer(email, &update).await
    }
}
