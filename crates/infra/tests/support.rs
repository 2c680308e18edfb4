#![allow(dead_code)]

use apigee_domain::ConnectionConfig;
use apigee_infra::Apigee;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const ORG: &str = "acme";
pub const TOKEN_PATH: &str = "/oauth/token";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const BEARER: &str = "Bearer test-access-token";

/// Connection settings pointing both the token endpoint and the management
/// API at `server`.
pub fn config_for(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig::builder()
        .org(ORG)
        .username("ops@acme.test")
        .password("s3cret")
        .base_url(server.uri())
        .token_url(format!("{}{TOKEN_PATH}", server.uri()))
        .build()
        .expect("test configuration should be valid")
}

/// Token endpoint that always issues [`ACCESS_TOKEN`].
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "test-refresh-token",
            "token_type": "bearer",
            "expires_in": 1799
        })))
        .mount(server)
        .await;
}

/// Facade wired to `server`, with a working token endpoint.
pub async fn apigee_for(server: &MockServer) -> Apigee {
    mount_token_endpoint(server).await;
    Apigee::new(&config_for(server)).expect("client should build")
}

/// Path under the organization, e.g. `org_path("apis")` → `/v1/o/acme/apis`.
pub fn org_path(rest: &str) -> String {
    if rest.is_empty() {
        format!("/v1/o/{ORG}")
    } else {
        format!("/v1/o/{ORG}/{rest}")
    }
}

/// Requests received by `server`, excluding token requests.
pub async fn api_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() != TOKEN_PATH)
        .collect()
}

/// Requests received by the token endpoint.
pub async fn token_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == TOKEN_PATH)
        .collect()
}
