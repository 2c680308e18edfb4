//! API proxy operations

use std::path::Path;

use apigee_common::validation::{require_non_empty, require_revision, NameValidator};
use apigee_domain::{ApigeeError, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{Apigee, Endpoint};
use crate::errors::InfraError;

const PROXY: &str = "proxy";
const NPM: &str = "installNodeDependencies";

impl Apigee {
    /// Create a proxy with no revisions.
    ///
    /// # Errors
    /// `ApigeeError::Validation` if `name` is empty or contains characters
    /// outside `[A-Za-z0-9_-]`; no request is sent in that case.
    pub async fn create_empty_proxy(&self, name: &str) -> Result<Value> {
        NameValidator::proxy().validate(name)?;
        let request = self.request(Method::POST, Endpoint::Proxies).json(json!({ "name": name }));
        self.client.send(request).await
    }

    /// Names of all proxies in the organization.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_proxies(&self) -> Result<Value> {
        self.call(Method::GET, Endpoint::Proxies).await
    }

    /// Revision numbers of a proxy, as strings.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_proxy_revisions(&self, name: &str) -> Result<Value> {
        require_non_empty(PROXY, "name", name)?;
        self.call(Method::GET, Endpoint::ProxyRevisions { name }).await
    }

    /// A proxy, or one of its revisions when `revision` is given.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn get_proxy(&self, name: &str, revision: Option<u32>) -> Result<Value> {
        self.proxy_or_revision(Method::GET, name, revision).await
    }

    /// Delete a proxy, or one of its revisions when `revision` is given.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn delete_proxy(&self, name: &str, revision: Option<u32>) -> Result<Value> {
        self.proxy_or_revision(Method::DELETE, name, revision).await
    }

    /// Upload a proxy bundle (zip) as a new revision of `name`.
    ///
    /// # Errors
    /// `ApigeeError::Validation` for an invalid name, `ApigeeError::Io` if
    /// the bundle cannot be read, otherwise dispatcher errors.
    pub async fn import_proxy(
        &self,
        name: &str,
        bundle_path: impl AsRef<Path>,
        validate: bool,
    ) -> Result<Value> {
        NameValidator::proxy().validate(name)?;

        let bundle_path = bundle_path.as_ref();
        let bytes = tokio::fs::read(bundle_path).await.map_err(|err| {
            ApigeeError::from(InfraError::from(err))
        })?;
        let file_name = bundle_path
            .file_name()
            .map_or_else(|| format!("{name}.zip"), |f| f.to_string_lossy().into_owned());
        debug!(proxy = name, file = %file_name, size = bytes.len(), "importing proxy bundle");

        let request = self
            .request(Method::POST, Endpoint::Proxies)
            .query("action", "import")
            .query("name", name)
            .query("validate", validate)
            .multipart_file("file", file_name, bytes);
        self.client.send(request).await
    }

    /// Download a revision as a zip bundle.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn download_proxy(&self, name: &str, revision: u32) -> Result<Vec<u8>> {
        require_non_empty(PROXY, "name", name)?;
        let request = self
            .request(Method::GET, Endpoint::ProxyRevision { name, revision })
            .query("format", "bundle");
        self.client.send_bytes(request).await
    }

    /// Undeploy one revision from every environment it is deployed to.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn undeploy_proxy_revision(&self, name: &str, revision: u32) -> Result<Value> {
        require_non_empty(PROXY, "name", name)?;
        self.call(Method::DELETE, Endpoint::ProxyRevisionDeployments { name, revision }).await
    }

    /// Undeploy every revision of a proxy, oldest first.
    ///
    /// Returns one result per revision. Stops at the first failure.
    ///
    /// # Errors
    /// `ApigeeError::Decode` if the revision list is not an array of
    /// revision numbers, otherwise dispatcher errors.
    pub async fn undeploy_proxy(&self, name: &str) -> Result<Vec<Value>> {
        let revisions = parse_revisions(&self.list_proxy_revisions(name).await?)?;
        info!(proxy = name, count = revisions.len(), "undeploying proxy revisions");

        let mut results = Vec::with_capacity(revisions.len());
        for revision in revisions {
            results.push(self.undeploy_proxy_revision(name, revision).await?);
        }
        Ok(results)
    }

    /// Run `npm install` for a Node.js-backed proxy revision.
    ///
    /// # Errors
    /// `ApigeeError::Validation` for an empty name or revision `0`,
    /// otherwise dispatcher errors.
    pub async fn install_node_dependencies(&self, name: &str, revision: u32) -> Result<Value> {
        require_non_empty(NPM, "name", name)?;
        require_revision(NPM, revision)?;

        let request = self
            .request(Method::POST, Endpoint::ProxyRevisionNpm { name, revision })
            .form([("command", "install")]);
        self.client.send(request).await
    }

    async fn proxy_or_revision(
        &self,
        method: Method,
        name: &str,
        revision: Option<u32>,
    ) -> Result<Value> {
        require_non_empty(PROXY, "name", name)?;
        let endpoint = match revision {
            Some(revision) => Endpoint::ProxyRevision { name, revision },
            None => Endpoint::Proxy { name },
        };
        self.call(method, endpoint).await
    }
}

/// Revision lists come back as `["1", "2"]`; numbers are accepted too.
fn parse_revisions(value: &Value) -> Result<Vec<u32>> {
    let invalid = || ApigeeError::Decode(format!("unexpected revision list: {value}"));

    let items = value.as_array().ok_or_else(invalid)?;
    let mut revisions = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.parse::<u32>().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        })
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(invalid)?;
    revisions.sort_unstable();
    Ok(revisions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revisions_parse_from_strings_or_numbers() {
        assert_eq!(parse_revisions(&json!(["3", "1", "2"])).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_revisions(&json!([4, 5])).unwrap(), vec![4, 5]);
        assert!(parse_revisions(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn malformed_revision_lists_are_decode_errors() {
        for bad in [json!({}), json!(["one"]), json!([-1]), json!(null)] {
            assert!(matches!(parse_revisions(&bad), Err(ApigeeError::Decode(_))), "{bad}");
        }
    }
}
