use std::time::Duration;

use chat_engine::{
    FailureKind, QueryBody, QueryResponse, ReqwestTransport, Transport, TransportSettings,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(TransportSettings {
        endpoint: format!("{}/api/query", server.uri()),
        ..TransportSettings::default()
    })
}

fn body(query: &str, email: &str) -> QueryBody {
    QueryBody {
        query: query.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn posts_json_and_parses_recommendation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "query": "budget tablet",
            "email": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "recommendation": "### Pick\n* Tab A",
            "debug_logs": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = transport_for(&server)
        .send(&body("budget tablet", ""))
        .await
        .expect("send ok");

    assert_eq!(
        response,
        QueryResponse {
            success: true,
            recommendation: Some("### Pick\n* Tab A".to_string()),
        }
    );
}

#[tokio::test]
async fn failure_payload_is_not_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&server)
        .await;

    let response = transport_for(&server)
        .send(&body("x", "me@example.com"))
        .await
        .expect("send ok");

    assert!(!response.success);
    assert_eq!(response.recommendation, None);
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "detail": "boom" })),
        )
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&body("x", ""))
        .await
        .expect_err("should fail");

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&body("x", ""))
        .await
        .expect_err("should fail");

    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        endpoint: format!("{}/api/query", server.uri()),
        max_bytes: 16,
        ..TransportSettings::default()
    });
    let err = transport.send(&body("x", "")).await.expect_err("should fail");

    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn slow_backend_hits_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        endpoint: format!("{}/api/query", server.uri()),
        request_timeout: Some(Duration::from_millis(100)),
        ..TransportSettings::default()
    });
    let err = transport.send(&body("x", "")).await.expect_err("should fail");

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let transport = ReqwestTransport::new(TransportSettings {
        endpoint: "not a url".to_string(),
        ..TransportSettings::default()
    });
    let err = transport.send(&body("x", "")).await.expect_err("should fail");

    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
