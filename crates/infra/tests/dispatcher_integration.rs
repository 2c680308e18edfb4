//! Integration tests for the authenticated request dispatcher
//!
//! Exercises `ApiClient` with the production `TokenManager` + `TokenClient`
//! pair against a wiremock server acting as both login service and
//! management API.

mod support;

use std::sync::Arc;
use std::time::Duration;

use apigee_common::auth::{TokenClient, TokenManager};
use apigee_common::testing::MockClock;
use apigee_domain::ApigeeError;
use apigee_infra::{ApiClient, ApiRequest, HttpClient};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::json;
use support::{api_requests, config_for, mount_token_endpoint, org_path, token_requests, BEARER};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, clock: &MockClock) -> ApiClient {
    let config = config_for(server);
    let tokens = TokenManager::with_clock(
        TokenClient::from_config(&config).unwrap(),
        Arc::new(clock.clone()),
    );
    ApiClient::new(config.base_url().clone(), HttpClient::new().unwrap(), Arc::new(tokens))
}

async fn mounted() -> (MockServer, ApiClient, MockClock) {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;
    let clock = MockClock::at(1_700_000_000);
    let client = client_for(&server, &clock);
    (server, client, clock)
}

/// A 201 body comes back unchanged, and the call carries the bearer token.
#[tokio::test]
async fn test_created_body_is_returned_unchanged() {
    let (server, client, _) = mounted().await;
    let created = json!({"name": "orders", "revision": ["1"], "metaData": {"createdBy": "ops"}});
    Mock::given(method("POST"))
        .and(path(org_path("apis")))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let body = client
        .send(ApiRequest::post("v1/o/acme/apis").json(json!({"name": "orders"})))
        .await
        .unwrap();

    assert_eq!(body, created);
}

/// A 404 surfaces as `ApiRequest` carrying status, reason and body.
#[tokio::test]
async fn test_not_found_is_an_api_request_error() {
    let (server, client, _) = mounted().await;
    Mock::given(method("GET"))
        .and(path(org_path("apis/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "messaging.config.beans.ApplicationDoesNotExist",
            "message": "APIProxy named missing does not exist in organization acme"
        })))
        .mount(&server)
        .await;

    let err = client.send(ApiRequest::get("v1/o/acme/apis/missing")).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        ApigeeError::ApiRequest { status_text, body, .. } => {
            assert_eq!(status_text, "Not Found");
            assert_eq!(body["code"], "messaging.config.beans.ApplicationDoesNotExist");
        }
        other => panic!("expected api request error, got {other:?}"),
    }
}

/// Non-JSON error bodies are kept as a JSON string.
#[tokio::test]
async fn test_plain_text_error_body_is_preserved() {
    let (server, client, _) = mounted().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .mount(&server)
        .await;

    let err = client.send(ApiRequest::get("v1/o/acme")).await.unwrap_err();

    match err {
        ApigeeError::ApiRequest { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, json!("Bad gateway"));
        }
        other => panic!("expected api request error, got {other:?}"),
    }
}

/// Statuses outside 200-202 below 400 resolve to `{}` whatever the body.
#[tokio::test]
async fn test_other_statuses_yield_empty_object() {
    let (server, client, _) = mounted().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(203).set_body_json(json!({"ignored": true})))
        .mount(&server)
        .await;

    let deleted = client.send(ApiRequest::delete("v1/o/acme/apis/x")).await.unwrap();
    let non_authoritative = client.send(ApiRequest::get("v1/o/acme")).await.unwrap();

    assert_eq!(deleted, json!({}));
    assert_eq!(non_authoritative, json!({}));
}

/// A caller-supplied Authorization header never replaces the bearer token.
#[tokio::test]
async fn test_bearer_token_wins_over_caller_authorization() {
    let (server, client, _) = mounted().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client
        .send(
            ApiRequest::get("v1/o/acme")
                .header(AUTHORIZATION, HeaderValue::from_static("Basic c3B5OnNweQ==")),
        )
        .await
        .unwrap();

    let requests = api_requests(&server).await;
    let values: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
    assert_eq!(values, vec![BEARER]);
}

/// The token is fetched once and reused until it is within 30 seconds of
/// expiry, then refreshed exactly once.
#[tokio::test]
async fn test_token_is_cached_then_refreshed() {
    let (server, client, clock) = mounted().await;
    Mock::given(method("GET"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["orders"])))
        .mount(&server)
        .await;

    for _ in 0..3 {
        client.send(ApiRequest::get("v1/o/acme/apis")).await.unwrap();
    }
    assert_eq!(token_requests(&server).await.len(), 1);

    clock.advance(Duration::from_secs(1780));
    client.send(ApiRequest::get("v1/o/acme/apis")).await.unwrap();

    let tokens = token_requests(&server).await;
    assert_eq!(tokens.len(), 2);
    let refresh = String::from_utf8_lossy(&tokens[1].body);
    assert!(refresh.contains("grant_type=refresh_token"));
    assert!(refresh.contains("refresh_token=test-refresh-token"));
}

/// A rejected token request fails the call before the API is contacted.
#[tokio::test]
async fn test_token_failure_aborts_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":"unauthorized"}"#),
        )
        .mount(&server)
        .await;
    let client = client_for(&server, &MockClock::at(0));

    let err = client.send(ApiRequest::get("v1/o/acme/apis")).await.unwrap_err();

    match err {
        ApigeeError::TokenAcquisition { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, r#"{"error":"unauthorized"}"#);
        }
        other => panic!("expected token acquisition error, got {other:?}"),
    }
    assert!(api_requests(&server).await.is_empty());
}

/// `send_bytes` passes bundles through untouched.
#[tokio::test]
async fn test_send_bytes_returns_raw_body() {
    let (server, client, _) = mounted().await;
    let bundle = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(bundle.clone(), "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let bytes = client.send_bytes(ApiRequest::get("v1/o/acme/apis/x/revisions/1")).await.unwrap();

    assert_eq!(bytes, bundle);
}
