use crate::application::{commands::preferences::UpdateSubscriptionsCommand, dto::ActionOutcome};
use crate::domain::CustomerAction;
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::JsonBody,
    state::HttpState,
};
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PreferenceLinkParams {
    /// Customer email address.
    pub email: Option<String>,
    /// Legacy customer id; pauses the customer when no email is given.
    pub cio: Option<String>,
    /// One of `pause`, `unpause`, `international`, `unsubscribe`.
    pub action: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSubscriptionsRequest {
    pub email: String,
    /// Attribute name to `"true"`, `"false"` or `"none"`.
    pub subscriptions: HashMap<String, String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UnsubscribeAllRequest {
    pub email: String,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[utoipa::path(
    get,
    path = "/",
    params(PreferenceLinkParams),
    responses(
        (status = 200, description = "Action applied, or nothing requested.", body = ActionOutcome),
        (status = 400, description = "Unknown action.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Attribute API rejected the change.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Preferences"
)]
pub async fn handle_link(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PreferenceLinkParams>,
) -> HttpResult<Json<ActionOutcome>> {
    let commands = &state.services.preference_commands;

    if let Some(email) = non_blank(params.email.as_ref()) {
        let Some(action) = non_blank(params.action.as_ref()) else {
            tracing::debug!(email, "email link opened without an action");
            return Ok(Json(ActionOutcome::idle()));
        };
        let action = action.parse::<CustomerAction>().map_err(|err| {
            tracing::warn!(email, error = %err, "unknown action requested");
            HttpError::bad_request("Unknown action requested.")
        })?;
        let outcome = commands.apply_action(email, action).await.into_http()?;
        return Ok(Json(outcome));
    }

    if let Some(customer_id) = non_blank(params.cio.as_ref()) {
        let outcome = commands.pause_legacy(customer_id).await.into_http()?;
        return Ok(Json(outcome));
    }

    Ok(Json(ActionOutcome::idle()))
}

#[utoipa::path(
    post,
    path = "/update-subscriptions",
    request_body = UpdateSubscriptionsRequest,
    responses(
        (status = 200, description = "Subscriptions updated.", body = ActionOutcome),
        (status = 400, description = "Malformed request.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Attribute API rejected the change.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Preferences"
)]
pub async fn update_subscriptions(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<UpdateSubscriptionsRequest>,
) -> HttpResult<Json<ActionOutcome>> {
    let outcome = state
        .services
        .preference_commands
        .update_subscriptions(UpdateSubscriptionsCommand {
            email: payload.email,
            subscriptions: payload.subscriptions,
        })
        .await
        .into_http()?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/unsubscribe-all",
    request_body = UnsubscribeAllRequest,
    responses(
        (status = 200, description = "Customer unsubscribed from every brand.", body = ActionOutcome),
        (status = 400, description = "Malformed request.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Attribute API rejected the change.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Preferences"
)]
pub async fn unsubscribe_all(
    Extension(state): Extension<HttpState>,
    JsonBody(payload): JsonBody<UnsubscribeAllRequest>,
) -> HttpResult<Json<ActionOutcome>> {
    let outcome = state
        .services
        .preference_commands
        .unsubscribe_all(&payload.email)
        .await
        .into_http()?;
    Ok(Json(outcome))
}
