//! Token endpoint client
//!
//! Performs the OAuth2 password and refresh-token grants against the Edge
//! login service:
//! - form-encoded body carrying `grant_type` and the grant's fields
//! - HTTP Basic client authentication with the fixed `edgecli` pair
//! - exactly one request per call, no retry

use std::fmt;

use apigee_domain::constants::{TOKEN_ACCEPT_HEADER, TOKEN_CLIENT_ID, TOKEN_CLIENT_SECRET};
use apigee_domain::{ApigeeError, ConnectionConfig};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::traits::TokenGrantClient;
use super::types::{GrantType, TokenResponse};

/// Error type for token endpoint operations
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token endpoint answered with a status other than 200
    #[error("token endpoint returned status {status}: {message}")]
    Acquisition { status: u16, message: String, body: String },

    /// HTTP request failed before a status was received
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 200 response whose body is not a token
    #[error("failed to parse token response: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("token client configuration error: {0}")]
    Config(String),
}

impl From<TokenError> for ApigeeError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Acquisition { status, message, body } => {
                ApigeeError::TokenAcquisition { status, message, body }
            }
            TokenError::Request(e) => ApigeeError::Network(format!("token request failed: {e}")),
            TokenError::Parse(msg) => ApigeeError::Decode(msg),
            TokenError::Config(msg) => ApigeeError::Config(msg),
        }
    }
}

/// User credentials for the password grant
#[derive(Clone)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// OAuth2 client for the Edge login service
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: Client,
    token_url: Url,
    credentials: PasswordCredentials,
}

impl TokenClient {
    /// Create a client posting to `token_url`.
    ///
    /// # Errors
    /// Returns [`TokenError::Config`] if the proxy URL is rejected or the
    /// HTTP client cannot be built.
    pub fn new(
        token_url: Url,
        credentials: PasswordCredentials,
        proxy: Option<&Url>,
    ) -> Result<Self, TokenError> {
        let mut builder = Client::builder();
        builder = match proxy {
            Some(url) => builder.proxy(
                reqwest::Proxy::all(url.as_str())
                    .map_err(|e| TokenError::Config(format!("invalid proxy: {e}")))?,
            ),
            None => builder.no_proxy(),
        };
        let http = builder
            .build()
            .map_err(|e| TokenError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, token_url, credentials })
    }

    /// Create a client from validated connection settings.
    ///
    /// # Errors
    /// See [`TokenClient::new`].
    pub fn from_config(config: &ConnectionConfig) -> Result<Self, TokenError> {
        Self::new(
            config.token_url().clone(),
            PasswordCredentials {
                username: config.username().to_string(),
                password: config.password().to_string(),
            },
            config.proxy(),
        )
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    fn form_fields(&self, grant: &GrantType) -> Vec<(&'static str, String)> {
        let mut form = vec![("grant_type", grant.as_str().to_string())];
        match grant {
            GrantType::Password => {
                form.push(("username", self.credentials.username.clone()));
                form.push(("password", self.credentials.password.clone()));
            }
            GrantType::RefreshToken(refresh_token) => {
                form.push(("refresh_token", refresh_token.clone()));
            }
        }
        form
    }

    /// Exchange `grant` for a token response.
    ///
    /// # Errors
    /// Returns [`TokenError::Acquisition`] for any status other than 200,
    /// [`TokenError::Request`] on transport failure and
    /// [`TokenError::Parse`] if a 200 body is not a token.
    pub async fn request_token(&self, grant: &GrantType) -> Result<TokenResponse, TokenError> {
        debug!(grant_type = grant.as_str(), url = %self.token_url, "requesting access token");

        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(TOKEN_CLIENT_ID, Some(TOKEN_CLIENT_SECRET))
            .header(ACCEPT, TOKEN_ACCEPT_HEADER)
            .form(&self.form_fields(grant))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = status.canonical_reason().map_or_else(|| status.to_string(), str::to_string);
            warn!(grant_type = grant.as_str(), status = status.as_u16(), "token request rejected");
            return Err(TokenError::Acquisition { status: status.as_u16(), message, body });
        }

        response.json::<TokenResponse>().await.map_err(|e| TokenError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TokenGrantClient for TokenClient {
    async fn request_token(&self, grant: &GrantType) -> Result<TokenResponse, TokenError> {
        TokenClient::request_token(self, grant).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    // base64("edgecli:edgeclisecret")
    const BASIC_AUTH: &str = "Basic ZWRnZWNsaTplZGdlY2xpc2VjcmV0";

    fn client_for(server: &MockServer) -> TokenClient {
        let url = Url::parse(&format!("{}/oauth/token", server.uri())).unwrap();
        TokenClient::new(
            url,
            PasswordCredentials { username: "ops@acme.test".into(), password: "p@ss word".into() },
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn password_grant_sends_form_and_client_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(header("authorization", BASIC_AUTH))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(header("accept", "application/json;charset=utf-8"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=ops%40acme.test"))
            .and(body_string_contains("password=p%40ss+word"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc",
                "refresh_token": "def",
                "expires_in": 1799
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).request_token(&GrantType::Password).await.unwrap();

        assert_eq!(response.access_token, "abc");
        assert_eq!(response.refresh_token.as_deref(), Some("def"));
        assert_eq!(response.expires_in, 1799);
    }

    #[tokio::test]
    async fn refresh_grant_sends_refresh_token_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=def"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "ghi", "expires_in": 1799})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .request_token(&GrantType::RefreshToken("def".into()))
            .await
            .unwrap();

        assert_eq!(response.access_token, "ghi");
        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("username="));
        assert!(!body.contains("password="));
    }

    #[tokio::test]
    async fn non_200_status_is_an_acquisition_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"error":"unauthorized","error_description":"Bad credentials"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).request_token(&GrantType::Password).await.unwrap_err();

        match err {
            TokenError::Acquisition { status, message, body } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("expected acquisition error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_success_codes_are_still_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"access_token": "x"})))
            .mount(&server)
            .await;

        let err = client_for(&server).request_token(&GrantType::Password).await.unwrap_err();
        assert!(matches!(err, TokenError::Acquisition { status: 201, .. }));
    }

    #[tokio::test]
    async fn malformed_200_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).request_token(&GrantType::Password).await.unwrap_err();
        assert!(matches!(err, TokenError::Parse(_)));
    }

    #[test]
    fn converts_into_domain_errors() {
        let err: ApigeeError =
            TokenError::Acquisition { status: 400, message: "Bad Request".into(), body: "{}".into() }
                .into();
        assert!(matches!(err, ApigeeError::TokenAcquisition { status: 400, .. }));

        let err: ApigeeError = TokenError::Parse("eof".into()).into();
        assert!(matches!(err, ApigeeError::Decode(_)));
    }
}
