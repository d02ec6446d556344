// src/application/ports/customer_attributes.rs
use crate::application::ApplicationResult;
use crate::domain::{CustomerIdentifier, preferences::CustomerUpdate};
use async_trait::async_trait;

/// Customer profile writes on the external tracking platform.
///
/// Implementations make exactly one outbound request per call and never retry.
/// Every failure is reported as [`ApplicationError::ExternalApi`].
///
/// [`ApplicationError::ExternalApi`]: crate::application::error::ApplicationError::ExternalApi
#[async_trait]
pub trait CustomerAttributeApi: Send + Sync {
    async fn update_customer(
        &self,
        identifier: &CustomerIdentifier,
        update: &CustomerUpdate,
    ) -> ApplicationResult<()>;
}
