// tests/e2e_preferences.rs
use axum::body::Body;
use axum::http::{Request, StatusCode};
use email_preferences::domain::{
    audit::ActionTag,
    preferences::{AttributePatch, CustomerUpdate},
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt as _;

mod support;
use support::{RecordingAttributeApi, Reply};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// 配信停止が成功すると UNSUBSCRIBE が1件記録される
#[tokio::test]
async fn unsubscribe_link_updates_customer_and_records_once() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(get("/?email=jane@example.com&action=unsubscribe"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = support::body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Customer (jane@example.com) has been unsubscribed."
    );

    assert_eq!(
        app.api.calls(),
        [(
            "jane@example.com".to_string(),
            CustomerUpdate::Attributes(AttributePatch::new().set("unsubscribed", true))
        )]
    );
    let records = app.repo.snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].email, "jane@example.com");
    assert_eq!(records[0].action, ActionTag::Unsubscribe);
}

/// 外部APIが失敗した場合は記録せず 502 を返す
#[tokio::test]
async fn failed_attribute_write_records_nothing() {
    let app = support::make_test_app(RecordingAttributeApi::failing());

    let resp = app
        .router
        .oneshot(get("/?email=jane@example.com&action=pause"))
        .await
        .unwrap();
    support::assert_error_response(
        resp,
        StatusCode::BAD_GATEWAY,
        "Error processing pause request. Check logs.",
    )
    .await;
    assert!(app.repo.snapshot().is_empty());
}

#[tokio::test]
async fn each_link_action_records_its_tag() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    for (action, message) in [
        ("pause", "Customer (a@example.com) has been paused."),
        ("unpause", "Customer (a@example.com) has been unpaused."),
        (
            "international",
            "Customer (a@example.com) moved to Australian/International list.",
        ),
    ] {
        let resp = app
            .router
            .clone()
            .oneshot(get(&format!("/?email=a@example.com&action={action}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{action}");
        assert_eq!(support::body_json(resp).await["message"], message);
    }

    let tags: Vec<ActionTag> = app.repo.snapshot().into_iter().map(|r| r.action).collect();
    assert_eq!(
        tags,
        [ActionTag::Pause, ActionTag::Unpause, ActionTag::InternationalMove]
    );
    // pause, unpause, then remove + add for the list move
    assert_eq!(app.api.call_count(), 4);
}

#[tokio::test]
async fn partial_list_move_is_reported_as_retryable() {
    let app = support::make_test_app(RecordingAttributeApi::scripted([
        Reply::Ok,
        Reply::Fail("timeout"),
    ]));

    let resp = app
        .router
        .oneshot(get("/?email=a@example.com&action=international"))
        .await
        .unwrap();
    support::assert_error_response(
        resp,
        StatusCode::BAD_GATEWAY,
        "Error processing international request; it is safe to try again.",
    )
    .await;
    assert!(app.repo.snapshot().is_empty());
}

#[tokio::test]
async fn unknown_action_is_rejected_without_side_effects() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(get("/?email=a@example.com&action=explode"))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Unknown action requested.")
        .await;
    assert_eq!(app.api.call_count(), 0);
    assert!(app.repo.snapshot().is_empty());
}

#[tokio::test]
async fn email_without_action_is_a_no_op() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(get("/?email=a@example.com"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        support::body_json(resp).await,
        json!({ "success": false, "message": "" })
    );
    assert_eq!(app.api.call_count(), 0);
}

#[tokio::test]
async fn legacy_customer_id_link_pauses() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app.router.oneshot(get("/?cio=cust_42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        support::body_json(resp).await["message"],
        "Customer (ID: cust_42) has been paused."
    );

    let calls = app.api.calls();
    assert_eq!(calls[0].0, "cust_42");
    assert_eq!(
        calls[0].1,
        CustomerUpdate::Attributes(AttributePatch::new().set("paused", true))
    );
    assert_eq!(app.repo.snapshot()[0].action, ActionTag::Pause);
}

#[tokio::test]
async fn dot_segment_customer_id_is_rejected_before_any_call() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app.router.oneshot(get("/?cio=..")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.api.call_count(), 0);
    assert!(app.repo.snapshot().is_empty());
}

#[tokio::test]
async fn update_subscriptions_records_subscription_update() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(support::json_post(
            "/update-subscriptions",
            &json!({
                "email": "a@example.com",
                "subscriptions": { "sub_bbau": "true", "sub_bbus": "none" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        support::body_json(resp).await,
        json!({ "success": true, "message": "Subscriptions updated successfully" })
    );

    let CustomerUpdate::Attributes(patch) = &app.api.calls()[0].1 else {
        panic!("expected an attribute update");
    };
    assert_eq!(patch.get("sub_bbau"), Some(Some(true)));
    assert_eq!(patch.get("sub_bbus"), Some(None));
    assert_eq!(patch.get("unsubscribed"), Some(Some(false)));
    assert_eq!(app.repo.snapshot()[0].action, ActionTag::SubscriptionUpdate);
}

#[tokio::test]
async fn update_subscriptions_rejects_unknown_values() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(support::json_post(
            "/update-subscriptions",
            &json!({ "email": "a@example.com", "subscriptions": { "sub_bbau": "yes" } }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.api.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let req = Request::builder()
        .method("POST")
        .uri("/unsubscribe-all")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.router.oneshot(req).await.unwrap();
    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Invalid request format").await;
    assert_eq!(app.api.call_count(), 0);
}

#[tokio::test]
async fn unsubscribe_all_records_unsubscribe_all() {
    let app = support::make_test_app(RecordingAttributeApi::default());

    let resp = app
        .router
        .oneshot(support::json_post(
            "/unsubscribe-all",
            &json!({ "email": "a@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        support::body_json(resp).await["message"],
        "Unsubscribed from all brands successfully"
    );
    assert_eq!(app.repo.snapshot()[0].action, ActionTag::UnsubscribeAll);
}

/// 監査ストアの障害は顧客への応答に影響しない
#[tokio::test]
async fn storage_failure_after_successful_write_still_succeeds() {
    let api = Arc::new(RecordingAttributeApi::default());
    let services = support::build_services(api.clone(), Arc::new(support::BrokenAuditRepo));
    let router = support::router_for(services);

    let resp = router
        .oneshot(get("/?email=a@example.com&action=unsubscribe"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(api.call_count(), 1);
}
