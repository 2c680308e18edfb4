//! Environment-scoped key-value maps

use std::collections::BTreeMap;

use apigee_common::validation::require_non_empty;
use apigee_domain::{KeyValueMapSpec, Result};
use reqwest::Method;
use serde_json::Value;

use super::{to_json, Apigee, Endpoint};

impl Apigee {
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_key_value_maps(&self, env: &str) -> Result<Value> {
        require_non_empty("keyvaluemap", "environment", env)?;
        self.call(Method::GET, Endpoint::KeyValueMaps { env }).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_key_value_map(&self, env: &str, name: &str) -> Result<Value> {
        check_map(env, name)?;
        self.call(Method::GET, Endpoint::KeyValueMap { env, name }).await
    }

    /// Create a map whose entries are `entries`, sorted by key.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn create_key_value_map(
        &self,
        env: &str,
        name: &str,
        entries: &BTreeMap<String, String>,
        encrypted: bool,
    ) -> Result<Value> {
        check_map(env, name)?;
        let spec = KeyValueMapSpec::new(name, entries, encrypted);
        let request = self.request(Method::POST, Endpoint::KeyValueMaps { env }).json(to_json(&spec)?);
        self.client.send(request).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn delete_key_value_map(&self, env: &str, name: &str) -> Result<Value> {
        check_map(env, name)?;
        self.call(Method::DELETE, Endpoint::KeyValueMap { env, name }).await
    }
}

fn check_map(env: &str, name: &str) -> Result<()> {
    require_non_empty("keyvaluemap", "environment", env)?;
    require_non_empty("keyvaluemap", "name", name)?;
    Ok(())
}
