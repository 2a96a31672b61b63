use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use doorman_mock::sim::format_timestamp;

mod common;
use common::mock_app::MockApp;

#[tokio::test]
async fn test_fleet_status_skips_other_device_types() {
    let now = OffsetDateTime::now_utc();
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(now))
        .with_device("Gate Sensor", "gatesensor", "idle", Some(now));

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    let devices = body.as_object().unwrap();
    assert_eq!(devices.len(), 1);
    assert!(devices.contains_key("Garage"));
}

#[tokio::test]
async fn test_fleet_status_accepts_trailing_slash() {
    let app = MockApp::new()
        .await
        .with_garage("open", Some(OffsetDateTime::now_utc()));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert!(body.as_object().unwrap().contains_key("Garage"));
}

#[tokio::test]
async fn test_device_status_reports_state_duration_and_lock() {
    let two_hours_ago = OffsetDateTime::now_utc() - Duration::hours(2) - Duration::seconds(30);
    let app = MockApp::new().await.with_garage("closed", Some(two_hours_ago));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/Garage:1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(
        body,
        json!({
            "Garage": {
                "state": "closed",
                "last_changed": format_timestamp(two_hours_ago),
                "duration": "2 hours",
                "locked": false,
            }
        })
    );
}

#[tokio::test]
async fn test_status_filter_is_case_insensitive() {
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(OffsetDateTime::now_utc()));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/garage:1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert!(body.as_object().unwrap().contains_key("Garage"));
}

#[tokio::test]
async fn test_wrong_passcode_is_rejected() {
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(OffsetDateTime::now_utc()));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/Garage:9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(body, json!({ "error": "Invalid passcode" }));
}

#[tokio::test]
async fn test_bare_name_without_passcode_is_rejected() {
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(OffsetDateTime::now_utc()));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/Garage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(body, json!({ "error": "Invalid passcode" }));
}

#[tokio::test]
async fn test_empty_name_with_passcode_lists_everything() {
    let now = OffsetDateTime::now_utc();
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(now))
        .with_device("Back Door", "virtualgaragedooropener", "open", Some(now));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/:1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    let devices = body.as_object().unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.contains_key("Garage"));
    assert!(devices.contains_key("Back Door"));
}

#[tokio::test]
async fn test_unknown_device_yields_empty_object() {
    let app = MockApp::new()
        .await
        .with_garage("closed", Some(OffsetDateTime::now_utc()));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/Nope:1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_missing_timestamp_omits_changed_fields() {
    let app = MockApp::new().await.with_garage("closed", None);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/status/Garage:1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(body, json!({ "Garage": { "state": "closed", "locked": false } }));
}

#[tokio::test]
async fn test_vendor_credential_rejection_is_surfaced() {
    let app = MockApp::with_credentials(common::mock_app::VENDOR_USERNAME, "wrong").await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(
        body,
        json!({ "error": "The username/password combination is not valid" })
    );
}
