//! Environment cache operations

use apigee_common::validation::require_non_empty;
use apigee_domain::Result;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::{Apigee, Endpoint};

impl Apigee {
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_caches(&self, env: &str) -> Result<Value> {
        require_non_empty("cache", "environment", env)?;
        self.call(Method::GET, Endpoint::Caches { env }).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_cache(&self, env: &str, name: &str) -> Result<Value> {
        check_cache(env, name)?;
        self.call(Method::GET, Endpoint::Cache { env, name }).await
    }

    /// Create cache `name` in `env` with the given definition.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn create_cache(&self, env: &str, name: &str, properties: Value) -> Result<Value> {
        check_cache(env, name)?;
        let request = self.request(Method::POST, Endpoint::Cache { env, name }).json(properties);
        self.client.send(request).await
    }

    /// Replace a cache definition.
    ///
    /// With `preserve`, the current definition is fetched first and the
    /// top-level keys of `properties` are written over it, so omitted
    /// settings keep their values.
    ///
    /// # Errors
    /// Propagates dispatcher errors, including those of the initial fetch.
    pub async fn update_cache(
        &self,
        env: &str,
        name: &str,
        properties: Value,
        preserve: bool,
    ) -> Result<Value> {
        check_cache(env, name)?;

        let body = if preserve {
            let current = self.get_cache(env, name).await?;
            debug!(env, cache = name, "merging cache properties over current definition");
            merge_properties(current, properties)
        } else {
            properties
        };

        let request = self.request(Method::PUT, Endpoint::Cache { env, name }).json(body);
        self.client.send(request).await
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn delete_cache(&self, env: &str, name: &str) -> Result<Value> {
        check_cache(env, name)?;
        self.call(Method::DELETE, Endpoint::Cache { env, name }).await
    }

    /// Remove every entry from a cache.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn clear_cache(&self, env: &str, name: &str) -> Result<Value> {
        check_cache(env, name)?;
        let request = self
            .request(Method::POST, Endpoint::CacheEntries { env, name })
            .query("action", "clear")
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        self.client.send(request).await
    }

    /// Remove a single entry from a cache.
    ///
    /// Sent as `POST`, the same verb as [`Apigee::clear_cache`]; older
    /// client libraries issued a `GET` for this call.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn clear_cache_entry(&self, env: &str, name: &str, key: &str) -> Result<Value> {
        check_cache(env, name)?;
        require_non_empty("cache", "key", key)?;
        let request = self
            .request(Method::POST, Endpoint::CacheEntry { env, name, key })
            .query("action", "clear");
        self.client.send(request).await
    }
}

fn check_cache(env: &str, name: &str) -> Result<()> {
    require_non_empty("cache", "environment", env)?;
    require_non_empty("cache", "name", name)?;
    Ok(())
}

/// Shallow merge: keys of `update` replace keys of `current`. A non-object
/// on either side means `update` wins outright.
fn merge_properties(current: Value, update: Value) -> Value {
    match (current, update) {
        (Value::Object(mut current), Value::Object(update)) => {
            current.extend(update);
            Value::Object(current)
        }
        (_, update) => update,
    }
}
