// src/infrastructure/track_api.rs
use crate::application::{
    ApplicationResult, error::ApplicationError,
    ports::customer_attributes::CustomerAttributeApi,
};
use crate::config::TrackApiConfig;
use crate::domain::{
    CustomerIdentifier,
    preferences::{AttributePatch, CustomerUpdate, RelationshipChange},
};
use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde_json::{Map, Value, json};

const USER_AGENT: &str = concat!("email-preferences/", env!("CARGO_PKG_VERSION"));

/// Customer.io Track API client. One `PUT /customers/{identifier}` per update,
/// authenticated with the site id and API key as HTTP Basic credentials.
#[derive(Clone)]
pub struct TrackApiClient {
    client: Client,
    base_url: Url,
    site_id: String,
    api_key: String,
}

impl TrackApiClient {
    pub fn new(config: &TrackApiConfig) -> ApplicationResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApplicationError::infrastructure(format!("invalid track api base url: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApplicationError::infrastructure(
                "track api base url cannot carry a path",
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApplicationError::infrastructure(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            site_id: config.site_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn customer_url(&self, identifier: &CustomerIdentifier) -> ApplicationResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApplicationError::infrastructure("track api base url cannot carry a path"))?
            .pop_if_empty()
            .push("customers")
            .push(identifier.as_str());
        Ok(url)
    }
}

/// JSON body for one customer update.
pub fn payload_for(update: &CustomerUpdate) -> Value {
    match update {
        CustomerUpdate::Attributes(patch) => attributes_payload(patch),
        CustomerUpdate::Relationships(change) => relationships_payload(change),
    }
}

fn attributes_payload(patch: &AttributePatch) -> Value {
    let attributes: Map<String, Value> = patch
        .iter()
        .map(|(name, value)| (name.to_string(), value.map_or(Value::Null, Value::Bool)))
        .collect();
    Value::Object(attributes)
}

fn relationships_payload(change: &RelationshipChange) -> Value {
    json!({
        "cio_relationships": {
            "action": change.action.as_str(),
            "relationships": [
                {
                    "identifiers": {
                        "object_type_id": change.object_type_id,
                        "object_id": change.object_id,
                    }
                }
            ]
        }
    })
}

#[async_trait]
impl CustomerAttributeApi for TrackApiClient {
    async fn update_customer(
        &self,
        identifier: &CustomerIdentifier,
        update: &CustomerUpdate,
    ) -> ApplicationResult<()> {
        let url = self.customer_url(identifier)?;
        let body = serde_json::to_vec(&payload_for(update)).map_err(|e| {
            tracing::error!(identifier = %identifier, error = %e, "failed to encode track api payload");
            ApplicationError::external_api(format!("encoding payload for {identifier}: {e}"))
        })?;

        tracing::debug!(identifier = %identifier, endpoint = %url, "sending track api update");

        let response = self
            .client
            .put(url.clone())
            .basic_auth(&self.site_id, Some(&self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(identifier = %identifier, endpoint = %url, error = %e, "track api request failed");
                ApplicationError::external_api(format!("sending request for {identifier}: {e}"))
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(identifier = %identifier, endpoint = %url, status = status.as_u16(), "track api update applied");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        tracing::error!(
            identifier = %identifier,
            endpoint = %url,
            status = status.as_u16(),
            body = %body,
            "track api returned non-success status"
        );
        Err(ApplicationError::external_api(format!(
            "track api returned {status} for {identifier}: {body}"
        )))
    }
}
