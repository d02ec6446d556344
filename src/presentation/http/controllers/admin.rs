use crate::application::dto::ResultsDto;
use crate::domain::audit::ActionTag;
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::AdminUser,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearRecordsResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

#[utoipa::path(
    get,
    path = "/results",
    responses(
        (status = 200, description = "Action counts and every audit record, newest first.", body = ResultsDto),
        (status = 401, description = "Missing or invalid admin credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Admin"
)]
pub async fn results(
    Extension(state): Extension<HttpState>,
    AdminUser { username }: AdminUser,
) -> HttpResult<Json<ResultsDto>> {
    tracing::info!(admin = %username, "viewing audit results");
    let dto = state.services.audit_queries.results().await.into_http()?;
    Ok(Json(dto))
}

#[utoipa::path(
    get,
    path = "/results/csv/{action}",
    params(("action" = String, Path, description = "Action tag, e.g. PAUSE, BBAU or UNSUBSCRIBE")),
    responses(
        (status = 200, description = "CSV attachment with Date, Email and Action columns.", content_type = "text/csv", body = String),
        (status = 400, description = "Malformed action tag.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid admin credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Admin"
)]
pub async fn export_csv(
    Extension(state): Extension<HttpState>,
    AdminUser { username }: AdminUser,
    Path(action): Path<String>,
) -> HttpResult<Response> {
    let tag = ActionTag::parse(&action).map_err(|err| {
        tracing::warn!(action = %action, error = %err, "invalid action tag for csv export");
        HttpError::bad_request("Invalid action type")
    })?;

    let export = state
        .services
        .audit_queries
        .export_csv(&tag)
        .await
        .into_http()?;
    tracing::info!(admin = %username, action = %tag, rows = export.rows, "exported audit records");

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename
    ))
    .map_err(|_| HttpError::bad_request("Invalid action type"))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/results/clear",
    responses(
        (status = 200, description = "Every audit record deleted.", body = ClearRecordsResponse),
        (status = 401, description = "Missing or invalid admin credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Admin"
)]
pub async fn clear_records(
    Extension(state): Extension<HttpState>,
    AdminUser { username }: AdminUser,
) -> HttpResult<Json<ClearRecordsResponse>> {
    tracing::warn!(admin = %username, "clearing all audit records");
    let deleted = state.services.audit_commands.clear().await.into_http()?;
    Ok(Json(ClearRecordsResponse {
        success: true,
        message: "All records cleared successfully".into(),
        deleted,
    }))
}
