//! Shared flow operations

use apigee_common::validation::require_non_empty;
use apigee_domain::Result;
use reqwest::Method;
use serde_json::Value;

use super::{Apigee, Endpoint};

impl Apigee {
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_shared_flows(&self) -> Result<Value> {
        self.call(Method::GET, Endpoint::SharedFlows).await
    }

    /// Download a shared flow revision as a zip bundle.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn download_shared_flow(&self, name: &str, revision: u32) -> Result<Vec<u8>> {
        require_non_empty("sharedflow", "name", name)?;
        let request = self
            .request(Method::GET, Endpoint::SharedFlowRevision { name, revision })
            .query("format", "bundle");
        self.client.send_bytes(request).await
    }
}
