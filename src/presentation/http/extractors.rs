// src/presentation/http/extractors.rs
use crate::{application::error::ApplicationError, presentation::http::state::HttpState};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Basic};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// Passes only when the request carries the configured admin Basic credentials.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
            HttpError::from_error(ApplicationError::infrastructure(
                "application state missing",
            ))
        })?;

        let Some(credentials) = parts.headers.typed_get::<Authorization<Basic>>() else {
            return Err(HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            )));
        };

        if !app_state
            .services
            .admin_gate()
            .verify(credentials.username(), credentials.password())
        {
            tracing::warn!(username = credentials.username(), "rejected admin credentials");
            return Err(HttpError::from_error(ApplicationError::unauthorized(
                "invalid credentials",
            )));
        }

        Ok(Self {
            username: credentials.username().to_string(),
        })
    }
}

/// JSON body whose rejections use the service's error format.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let rejection: JsonRejection = rejection;
                tracing::warn!(error = %rejection.body_text(), "invalid request body");
                Err(HttpError::bad_request("Invalid request format"))
            }
        }
    }
}
