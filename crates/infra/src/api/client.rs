//! Authenticated request dispatcher
//!
//! Sends an [`ApiRequest`] to the management API with a bearer token and
//! classifies the response:
//!
//! | Status      | Result                                   |
//! |-------------|------------------------------------------|
//! | `>= 400`    | `ApigeeError::ApiRequest`                |
//! | `200..=202` | response body                            |
//! | otherwise   | empty JSON object (`{}`) / empty buffer  |

use std::sync::Arc;

use apigee_domain::{ApigeeError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::AccessTokenProvider;
use super::request::{ApiRequest, RequestBody};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Classified response of a successful (non-error) call
enum Outcome {
    Body(Vec<u8>),
    Empty,
}

/// API client that authenticates every call with a bearer token
#[derive(Clone)]
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// `base_url` should end with `/`; resource paths are joined beneath it.
    pub fn new(base_url: Url, http_client: HttpClient, auth: Arc<dyn AccessTokenProvider>) -> Self {
        Self { http_client: Arc::new(http_client), auth, base_url }
    }

    /// Create a builder for fluent configuration
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send `request` and return the decoded JSON body.
    ///
    /// Bodies that are not JSON come back as a JSON string, an empty body as
    /// `null`. Statuses outside `200..=202` below 400 yield `{}`.
    ///
    /// # Errors
    /// - `ApigeeError::TokenAcquisition` if no token could be obtained
    /// - `ApigeeError::ApiRequest` for status `>= 400`
    /// - `ApigeeError::Network` on transport failure
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        match self.execute(request).await? {
            Outcome::Body(bytes) => {
                let body = decode_body(&bytes);
                debug!(response = %body, "response data");
                Ok(body)
            }
            Outcome::Empty => Ok(Value::Object(Map::new())),
        }
    }

    /// Send `request` and return the raw response body.
    ///
    /// Used for bundle downloads. Statuses outside `200..=202` below 400
    /// yield an empty buffer.
    ///
    /// # Errors
    /// See [`ApiClient::send`].
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_bytes(&self, request: ApiRequest) -> Result<Vec<u8>> {
        match self.execute(request).await? {
            Outcome::Body(bytes) => {
                debug!(len = bytes.len(), "response bytes");
                Ok(bytes)
            }
            Outcome::Empty => Ok(Vec::new()),
        }
    }

    async fn execute(&self, request: ApiRequest) -> Result<Outcome> {
        let token = self.auth.access_token().await?;
        let url = self.url_for(&request)?;
        let method = request.method.clone();

        let mut headers = request.headers;
        headers.remove(AUTHORIZATION);

        let builder = self.http_client.request(method, url.clone()).headers(headers);
        let builder = apply_body(builder, request.body)?.bearer_auth(token);

        let response = self.http_client.send(builder).await?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApigeeError::from(InfraError::from(err)))?
            .to_vec();

        if status.as_u16() >= 400 {
            let body = decode_body(&bytes);
            warn!(status = status.as_u16(), url = %url, "api request failed");
            debug!(status = status.as_u16(), response = %body, "api request failed, response body");
            return Err(ApigeeError::ApiRequest {
                status: status.as_u16(),
                status_text: status_text(status),
                body,
            });
        }

        if (200..=202).contains(&status.as_u16()) {
            return Ok(Outcome::Body(bytes));
        }

        debug!(status = status.as_u16(), "non-error status without body semantics");
        Ok(Outcome::Empty)
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|err| ApigeeError::Config(format!("invalid request path {:?}: {err}", request.path)))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url.as_str()).finish_non_exhaustive()
    }
}

fn apply_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder> {
    let builder = match body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Form(pairs) => builder.form(&pairs),
        RequestBody::Multipart { field, file_name, bytes } => {
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str("application/octet-stream")
                .map_err(|err| ApigeeError::from(InfraError::from(err)))?;
            builder.multipart(Form::new().part(field, part))
        }
        RequestBody::Raw { content_type, bytes } => {
            builder.header(CONTENT_TYPE, content_type).body(bytes)
        }
    };
    Ok(builder)
}

/// JSON when it parses, a JSON string otherwise, `null` when empty.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<Url>,
    http_client: Option<HttpClient>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    #[must_use]
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the authentication provider
    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL or auth provider is missing, or the
    /// default HTTP client cannot be created
    pub fn build(self) -> Result<ApiClient> {
        let base_url =
            self.base_url.ok_or_else(|| ApigeeError::Config("Base URL not set".to_string()))?;
        let auth =
            self.auth.ok_or_else(|| ApigeeError::Config("Auth provider not set".to_string()))?;
        let http_client = match self.http_client {
            Some(client) => client,
            None => HttpClient::new()?,
        };

        Ok(ApiClient::new(base_url, http_client, auth))
    }
}
