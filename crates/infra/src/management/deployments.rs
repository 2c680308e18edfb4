//! Deployment and organization queries

use apigee_common::validation::require_non_empty;
use apigee_domain::Result;
use reqwest::Method;
use serde_json::Value;

use super::{Apigee, Endpoint};

const DEPLOYMENT: &str = "deployment";

impl Apigee {
    /// Environments a proxy revision is deployed to.
    ///
    /// # Errors
    /// `ApigeeError::Validation` for an empty name, otherwise dispatcher
    /// errors.
    pub async fn proxy_revision_deployments(&self, name: &str, revision: u32) -> Result<Value> {
        require_non_empty(DEPLOYMENT, "name", name)?;
        self.call(Method::GET, Endpoint::ProxyRevisionDeployments { name, revision }).await
    }

    /// # Errors
    /// `ApigeeError::Validation` for an empty name, otherwise dispatcher
    /// errors.
    pub async fn proxy_deployments(&self, name: &str) -> Result<Value> {
        require_non_empty(DEPLOYMENT, "name", name)?;
        self.call(Method::GET, Endpoint::ProxyDeployments { name }).await
    }

    /// Revisions of `proxy` deployed in `env`.
    ///
    /// # Errors
    /// `ApigeeError::Validation` for an empty proxy or environment name,
    /// otherwise dispatcher errors.
    pub async fn proxy_deployments_for_environment(&self, proxy: &str, env: &str) -> Result<Value> {
        require_non_empty(DEPLOYMENT, "name", proxy)?;
        require_non_empty(DEPLOYMENT, "environment", env)?;
        self.call(Method::GET, Endpoint::EnvironmentProxyDeployments { env, proxy }).await
    }

    /// Every deployment in the organization, with server status.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn all_proxy_deployments(&self) -> Result<Value> {
        self.call(Method::GET, Endpoint::Deployments).await
    }

    /// Every deployment in the organization, without server status or
    /// proxy configuration.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn proxy_deployments_for_org(&self) -> Result<Value> {
        let request = self
            .request(Method::GET, Endpoint::Deployments)
            .query("includeServerStatus", false)
            .query("includeApiConfig", false);
        self.client.send(request).await
    }

    /// Proxies and shared flows deployed in `env`.
    ///
    /// # Errors
    /// `ApigeeError::Validation` for an empty environment name, otherwise
    /// dispatcher errors.
    pub async fn environment_deployments(&self, env: &str) -> Result<Value> {
        require_non_empty(DEPLOYMENT, "environment", env)?;
        self.call(Method::GET, Endpoint::EnvironmentDeployments { env }).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_org(&self) -> Result<Value> {
        self.call(Method::GET, Endpoint::Organization).await
    }
}
