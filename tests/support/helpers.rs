// tests/support/helpers.rs
use super::mocks::{InMemoryAuditRepo, RecordingAttributeApi, SteppingClock};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use email_preferences::application::{
    ports::{ClockPort, CustomerAttributeApiPort},
    security::AdminGate,
    services::ApplicationServices,
};
use email_preferences::domain::audit::AuditRecordRepository;
use email_preferences::presentation::http::{
    routes::{RouterOptions, build_router_with_options},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Router plus handles on the doubles behind it.
pub struct TestApp {
    pub router: axum::Router,
    pub api: Arc<RecordingAttributeApi>,
    pub repo: Arc<InMemoryAuditRepo>,
}

pub fn build_services(
    api: Arc<CustomerAttributeApiPort>,
    repo: Arc<dyn AuditRecordRepository>,
) -> Arc<ApplicationServices> {
    let clock: Arc<ClockPort> = Arc::new(SteppingClock::default());
    Arc::new(ApplicationServices::new(
        api,
        repo,
        clock,
        AdminGate::new(ADMIN_USER, ADMIN_PASSWORD),
    ))
}

pub fn router_for(services: Arc<ApplicationServices>) -> axum::Router {
    build_router_with_options(
        HttpState { services },
        &RouterOptions {
            rate_limit: None,
            allowed_origins: Vec::new(),
        },
    )
}

pub fn make_test_app(api: RecordingAttributeApi) -> TestApp {
    let api = Arc::new(api);
    let repo = Arc::new(InMemoryAuditRepo::default());
    let services = build_services(api.clone(), repo.clone());
    TestApp {
        router: router_for(services),
        api,
        repo,
    }
}

pub fn make_test_router() -> axum::Router {
    make_test_app(RecordingAttributeApi::default()).router
}

/// `Basic` header value for the given pair, encoded by the `headers` crate.
pub fn basic_auth(username: &str, password: &str) -> header::HeaderValue {
    use headers::{Authorization, Header};
    let mut values: Vec<header::HeaderValue> = Vec::new();
    Authorization::basic(username, password).encode(&mut values);
    values.pop().expect("authorization header value")
}

pub fn admin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(ADMIN_USER, ADMIN_PASSWORD))
        .body(Body::empty())
        .unwrap()
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("expected valid json body")
}

/// Assert an `ErrorResponse` JSON with the expected status and message.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_message: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    assert_eq!(
        json.get("error").and_then(Value::as_str),
        expected_status.canonical_reason()
    );
    assert_eq!(
        json.get("message").and_then(Value::as_str),
        Some(expected_message)
    );
}
