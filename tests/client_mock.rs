//! End-to-end pipeline behavior against a local mock HTTP server.

mod support;

use mockito::Matcher;
use serde_json::json;
use settler::{Error, ErrorKind, Method, SettlerClient};
use std::io::Write;
use std::time::Duration;
use support::{MockServerFixture, API_KEY};

#[tokio::test]
async fn post_job_returns_data_envelope() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/api/v1/jobs")
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_header("content-type", "application/json")
        .match_header("user-agent", Matcher::Regex(r"^settler-rust-sdk/".to_string()))
        .match_header("x-settler-request-id", Matcher::Any)
        .match_body(Matcher::Json(json!({"name": "x"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"id":"job_1"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = fx.client();
    let resp = client
        .execute(Method::Post, "/api/v1/jobs", Some(&json!({"name": "x"})), None, true)
        .await
        .expect("request succeeds");
    assert_eq!(resp.into_data(), json!({"id": "job_1"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_job_is_not_found() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json("GET", "/api/v1/jobs/missing", 404, r#"{"message":"not found"}"#, 1)
        .await;

    let err = fx
        .client()
        .execute(Method::Get, "/api/v1/jobs/missing", None, None, true)
        .await
        .unwrap_err();
    match err {
        Error::NotFound {
            message,
            status_code,
            ..
        } => {
            assert_eq!(message, "not found");
            assert_eq!(status_code, 404);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn second_identical_webhook_post_is_rejected_locally() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json(
            "POST",
            "/api/v1/webhooks",
            201,
            r#"{"data":{"id":"wh_1","url":"http://a"}}"#,
            1,
        )
        .await;

    let client = fx.client();
    let body = json!({"url": "http://a"});
    client
        .execute(Method::Post, "/api/v1/webhooks", Some(&body), None, true)
        .await
        .expect("first call succeeds");
    let err = client
        .execute(Method::Post, "/api/v1/webhooks", Some(&body), None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateRequest { .. }), "{err:?}");
    assert_eq!(err.status_code(), 0);

    // Exactly one request reached the server.
    mock.assert_async().await;
}

#[tokio::test]
async fn separate_clients_do_not_share_dedup_state() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json("POST", "/api/v1/webhooks", 201, r#"{"data":{}}"#, 2)
        .await;

    let body = json!({"url": "http://a"});
    for client in [fx.client(), fx.client()] {
        client
            .execute(Method::Post, "/api/v1/webhooks", Some(&body), None, true)
            .await
            .expect("each client sends once");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn persistent_503_is_attempted_max_retries_plus_one() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json(
            "GET",
            "/api/v1/jobs/job_1",
            503,
            r#"{"message":"maintenance","error":"ServiceUnavailable"}"#,
            4,
        )
        .await;

    let err = fx
        .client_with_retries(3)
        .execute(Method::Get, "/api/v1/jobs/job_1", None, None, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status_code(), 503);
    assert_eq!(err.message(), "maintenance");
    assert_eq!(err.error_type(), Some("ServiceUnavailable"));
    mock.assert_async().await;
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json("DELETE", "/api/v1/jobs/job_1", 401, r#"{"message":"bad key"}"#, 1)
        .await;

    let err = fx
        .client_with_retries(3)
        .execute(Method::Delete, "/api/v1/jobs/job_1", None, None, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    mock.assert_async().await;
}

#[tokio::test]
async fn rate_limit_surfaces_after_retries() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json("GET", "/api/v1/adapters", 429, r#"{"message":"slow down"}"#, 2)
        .await;

    let err = fx
        .client_with_retries(1)
        .execute(Method::Get, "/api/v1/adapters", None, None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RateLimit { status_code: 429, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn plain_text_error_body_becomes_message() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .server
        .mock("GET", "/api/v1/jobs")
        .with_status(418)
        .with_body("I'm a teapot")
        .create_async()
        .await;

    let err = fx
        .client()
        .execute(Method::Get, "/api/v1/jobs", None, None, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status_code(), 418);
    assert_eq!(err.message(), "I'm a teapot");
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Nothing listens on port 1.
    let client = SettlerClient::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:1")
        .max_retries(1)
        .retry_backoff(0.0)
        .build()
        .unwrap();
    let err = client
        .execute(Method::Get, "/api/v1/jobs", None, None, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status_code(), 0);
}

#[test]
fn construction_requires_api_key() {
    let err = SettlerClient::builder().build().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(SettlerClient::new("").is_err());
    assert!(SettlerClient::new("sk_test").is_ok());
}

#[test]
fn construction_rejects_key_unusable_as_header() {
    let err = SettlerClient::builder().api_key("sk\nbad").build().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("api_key")
    );
}

#[tokio::test]
async fn zero_dedup_window_is_rejected_at_build() {
    let fx = MockServerFixture::new().await;
    let err = SettlerClient::builder()
        .api_key(API_KEY)
        .base_url(&fx.base_url)
        .dedup_ttl(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("dedup_ttl")
    );
}

#[tokio::test]
async fn slow_response_times_out_as_network_408() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .server
        .mock("GET", "/api/v1/adapters")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(800));
            w.write_all(br#"{"data":[]}"#)
        })
        .expect_at_least(1)
        .create_async()
        .await;

    let client = SettlerClient::builder()
        .api_key(API_KEY)
        .base_url(&fx.base_url)
        .timeout(Duration::from_millis(100))
        .max_retries(1)
        .retry_backoff(0.0)
        .build()
        .unwrap();

    let err = client.adapters().list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status_code(), 408);
    assert_eq!(err.message(), "Request timeout");
    assert!(err.is_retryable());
}
