// src/presentation/http/routes.rs
use crate::config::RateLimit;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{admin, preferences},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Per-IP rate limiting on the customer routes. Needs peer addresses, so
    /// serve with `into_make_service_with_connect_info`.
    pub rate_limit: Option<RateLimit>,
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            rate_limit: Some(RateLimit::default()),
            allowed_origins: Vec::new(),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    build_router_with_options(state, &RouterOptions::default())
}

pub fn build_router_with_options(state: HttpState, options: &RouterOptions) -> Router {
    let mut customer = Router::new()
        .route("/", get(preferences::handle_link))
        .route(
            "/update-subscriptions",
            post(preferences::update_subscriptions),
        )
        .route("/unsubscribe-all", post(preferences::unsubscribe_all));
    if let Some(layer) = options.rate_limit.and_then(rate_limit_layer) {
        customer = customer.layer(layer);
    }

    let admin = Router::new()
        .route("/results", get(admin::results))
        .route("/results/csv/{action}", get(admin::export_csv))
        .route("/results/clear", post(admin::clear_records));

    Router::new()
        .merge(openapi::docs_router())
        .route("/ping", get(ping))
        .route("/health", get(health))
        .merge(customer)
        .merge(admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(&options.allowed_origins))
                .layer(Extension(state)),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}

#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Liveness probe.", content_type = "text/plain", body = String)
    ),
    tag = "System"
)]
pub async fn ping() -> &'static str {
    "pong"
}
