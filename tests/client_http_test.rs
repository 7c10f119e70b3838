#![allow(clippy::unwrap_used)]
// Integration tests for `VoipMsClient` over real HTTP using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voipms::{Credentials, NewRingGroup, VoipMsClient, VoipMsError};

// ── Helpers ─────────────────────────────────────────────────────────

const REST_PATH: &str = "/api/v1/rest.php";

fn client_for(endpoint: &str) -> VoipMsClient {
    VoipMsClient::builder(Credentials::new("me@example.com", "api-pass").unwrap())
        .endpoint(endpoint)
        .user_agent("voipms-tests")
        .build()
        .unwrap()
}

/// Run `call` against `server` on a blocking thread.
///
/// The blocking client must not be built or dropped on an async worker.
async fn with_client<T: Send + 'static>(
    server: &MockServer,
    call: impl FnOnce(&VoipMsClient) -> T + Send + 'static,
) -> T {
    let endpoint = format!("{}{REST_PATH}", server.uri());
    tokio::task::spawn_blocking(move || call(&client_for(&endpoint)))
        .await
        .unwrap()
}

// ── Request shape ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_sends_credentials_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("api_username", "me@example.com"))
        .and(query_param("api_password", "api-pass"))
        .and(query_param("method", "getIP"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "ip": "203.0.113.9" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(&server, |client| client.test_connection()).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.get("ip"), Some(&json!("203.0.113.9")));
}

#[tokio::test(flavor = "multi_thread")]
async fn vendor_error_status_is_returned_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "getBalance"))
        .and(query_param("advanced", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ip_not_enabled" })),
        )
        .mount(&server)
        .await;

    let response = with_client(&server, |client| client.general().get_balance(true))
        .await
        .unwrap();

    assert_eq!(response.status(), Some("ip_not_enabled"));
    assert!(!response.is_success());
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn non_success_http_status_maps_to_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = with_client(&server, |client| client.general().get_ip()).await;

    assert!(
        matches!(
            result,
            Err(VoipMsError::HttpStatus { status: 503, ref body }) if body.as_deref() == Some("maintenance")
        ),
        "expected HttpStatus error, got: {result:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let result = with_client(&server, |client| client.general().get_ip()).await;

    assert!(
        matches!(result, Err(VoipMsError::Parse(_))),
        "expected Parse error, got: {result:?}"
    );
}

#[test]
fn connection_failure_hides_password() {
    let credentials = Credentials::new("me@example.com", "hunter2-SECRET").unwrap();
    let client = VoipMsClient::builder(credentials)
        .endpoint("http://127.0.0.1:1/api/v1/rest.php")
        .build()
        .unwrap();

    let err = client.test_connection().unwrap_err();

    assert!(matches!(err, VoipMsError::Transport(_)), "got: {err:?}");
    let mut shown = format!("{err} {err:?}");
    let mut source = std::error::Error::source(&err);
    while let Some(inner) = source {
        shown.push_str(&format!(" {inner}"));
        source = inner.source();
    }
    assert!(!shown.contains("hunter2-SECRET"), "password exposed: {shown}");
}

// ── Facades ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn ring_group_create_discovers_main_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "getSubAccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "accounts": [{ "id": "1", "account": "100000_office" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "setRingGroup"))
        .and(query_param("members", "account:100000"))
        .and(query_param("name", "Sales"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "ring_group": 4768 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(&server, |client| {
        client
            .ring_groups()
            .create_ring_group(&NewRingGroup::new("Sales", 101))
    })
    .await
    .unwrap();

    assert_eq!(response.get("name"), Some(&json!("Sales")));
    assert_eq!(response.get("ring_group"), Some(&json!(4768)));
}

#[tokio::test(flavor = "multi_thread")]
async fn forwarding_delete_prefetches_phone_number() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "getForwardings"))
        .and(query_param("forwarding", "18621"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "forwardings": [{ "forwarding": "18621", "phone_number": "8005551234" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", "delForwarding"))
        .and(query_param("forwarding", "18621"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(&server, |client| client.forwarding().delete_forwarding("18621"))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.get("phone_number"), Some(&json!("8005551234")));
}
