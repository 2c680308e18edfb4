//! Resource facade for the Edge management API
//!
//! [`Apigee`] exposes one async method per management operation. Each method
//! validates its input, picks an [`Endpoint`], attaches query and body, and
//! hands the request to [`ApiClient`]. Methods are grouped by resource:
//!
//! - proxies: create, import, download, list, get, delete, undeploy, npm
//! - environments: list, get, create, update
//! - deployments and organization
//! - caches, key-value maps, shared flows, API products
//!
//! # Example
//!
//! ```no_run
//! use apigee_infra::management::Apigee;
//!
//! # async fn example() -> apigee_domain::Result<()> {
//! let apigee = Apigee::from_env()?;
//! let proxies = apigee.list_proxies().await?;
//! println!("{proxies}");
//! # Ok(())
//! # }
//! ```

mod caches;
mod deployments;
pub mod endpoints;
mod environments;
mod key_value_maps;
mod products;
mod proxies;
mod shared_flows;

use std::sync::Arc;

use apigee_common::auth::{TokenClient, TokenManager};
use apigee_domain::{ApigeeError, ConnectionConfig, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

pub use self::endpoints::Endpoint;
use crate::api::{AccessTokenProvider, ApiClient, ApiRequest};
use crate::http::HttpClient;

/// Client for one Apigee organization
#[derive(Debug, Clone)]
pub struct Apigee {
    org: String,
    client: ApiClient,
}

impl Apigee {
    /// Build a client that authenticates with the configured credentials.
    ///
    /// No network call is made until the first resource method runs.
    ///
    /// # Errors
    /// Returns `ApigeeError::Config` if the HTTP clients cannot be built.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let tokens = TokenManager::new(TokenClient::from_config(config)?);
        let http = HttpClient::builder().proxy(config.proxy().cloned()).build()?;
        let client = ApiClient::new(config.base_url().clone(), http, Arc::new(tokens));
        Ok(Self::with_client(config.org(), client))
    }

    /// Build a client from `.env` and `APIGEE_*` environment variables.
    ///
    /// # Errors
    /// See [`crate::config::load`] and [`Apigee::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(&crate::config::load()?)
    }

    /// Use a custom token provider, e.g. a shared `TokenManager`.
    ///
    /// # Errors
    /// Returns `ApigeeError::Config` if the HTTP client cannot be built.
    pub fn with_token_provider(
        config: &ConnectionConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let http = HttpClient::builder().proxy(config.proxy().cloned()).build()?;
        let client = ApiClient::new(config.base_url().clone(), http, auth);
        Ok(Self::with_client(config.org(), client))
    }

    /// Wrap an existing dispatcher.
    pub fn with_client(org: impl Into<String>, client: ApiClient) -> Self {
        Self { org: org.into(), client }
    }

    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn request(&self, method: Method, endpoint: Endpoint<'_>) -> ApiRequest {
        ApiRequest::new(method, endpoint.path(&self.org))
    }

    async fn call(&self, method: Method, endpoint: Endpoint<'_>) -> Result<Value> {
        self.client.send(self.request(method, endpoint)).await
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|err| ApigeeError::Decode(format!("failed to encode request body: {err}")))
}
