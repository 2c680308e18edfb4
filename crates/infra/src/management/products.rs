//! API product queries

use apigee_common::validation::require_non_empty;
use apigee_domain::Result;
use reqwest::Method;
use serde_json::Value;

use super::{Apigee, Endpoint};

impl Apigee {
    /// Product names, or full product objects when `expand` is set.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_api_products(&self, expand: bool) -> Result<Value> {
        let request = self.request(Method::GET, Endpoint::ApiProducts).query("expand", expand);
        self.client.send(request).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_api_product(&self, name: &str) -> Result<Value> {
        require_non_empty("apiproduct", "name", name)?;
        self.call(Method::GET, Endpoint::ApiProduct { name }).await
    }
}
