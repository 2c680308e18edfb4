//! Resource path table
//!
//! Every management resource lives under `v1/o/{org}`. [`Endpoint`] names
//! each resource the facade touches and renders its path, percent-encoding
//! caller-supplied segments so names cannot escape their position.

use std::borrow::Cow;

use apigee_domain::constants::API_VERSION_PREFIX;

/// A management API resource, identified by its path parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Organization,
    Proxies,
    Proxy { name: &'a str },
    ProxyRevisions { name: &'a str },
    ProxyRevision { name: &'a str, revision: u32 },
    ProxyRevisionDeployments { name: &'a str, revision: u32 },
    ProxyRevisionNpm { name: &'a str, revision: u32 },
    ProxyDeployments { name: &'a str },
    Deployments,
    Environments,
    Environment { env: &'a str },
    EnvironmentDeployments { env: &'a str },
    EnvironmentProxyDeployments { env: &'a str, proxy: &'a str },
    Caches { env: &'a str },
    Cache { env: &'a str, name: &'a str },
    CacheEntries { env: &'a str, name: &'a str },
    CacheEntry { env: &'a str, name: &'a str, key: &'a str },
    KeyValueMaps { env: &'a str },
    KeyValueMap { env: &'a str, name: &'a str },
    SharedFlows,
    SharedFlowRevision { name: &'a str, revision: u32 },
    ApiProducts,
    ApiProduct { name: &'a str },
}

impl Endpoint<'_> {
    /// Path relative to the management API root.
    #[must_use]
    pub fn path(&self, org: &str) -> String {
        let mut path = format!("{API_VERSION_PREFIX}/{}", encode(org));
        for segment in self.segments() {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }

    fn segments(&self) -> Vec<Cow<'_, str>> {
        use Endpoint as E;

        let lit = |s: &'static str| Cow::Borrowed(s);
        let num = |n: u32| Cow::Owned(n.to_string());

        match *self {
            E::Organization => vec![],
            E::Proxies => vec![lit("apis")],
            E::Proxy { name } => vec![lit("apis"), encode(name)],
            E::ProxyRevisions { name } => vec![lit("apis"), encode(name), lit("revisions")],
            E::ProxyRevision { name, revision } => {
                vec![lit("apis"), encode(name), lit("revisions"), num(revision)]
            }
            E::ProxyRevisionDeployments { name, revision } => vec![
                lit("apis"),
                encode(name),
                lit("revisions"),
                num(revision),
                lit("deployments"),
            ],
            E::ProxyRevisionNpm { name, revision } => {
                vec![lit("apis"), encode(name), lit("revisions"), num(revision), lit("npm")]
            }
            E::ProxyDeployments { name } => vec![lit("apis"), encode(name), lit("deployments")],
            E::Deployments => vec![lit("deployments")],
            E::Environments => vec![lit("e")],
            E::Environment { env } => vec![lit("e"), encode(env)],
            E::EnvironmentDeployments { env } => vec![lit("e"), encode(env), lit("deployments")],
            E::EnvironmentProxyDeployments { env, proxy } => {
                vec![lit("e"), encode(env), lit("apis"), encode(proxy), lit("deployments")]
            }
            E::Caches { env } => vec![lit("e"), encode(env), lit("caches")],
            E::Cache { env, name } => vec![lit("e"), encode(env), lit("caches"), encode(name)],
            E::CacheEntries { env, name } => {
                vec![lit("e"), encode(env), lit("caches"), encode(name), lit("entries")]
            }
            E::CacheEntry { env, name, key } => vec![
                lit("e"),
                encode(env),
                lit("caches"),
                encode(name),
                lit("entries"),
                encode(key),
            ],
            E::KeyValueMaps { env } => vec![lit("e"), encode(env), lit("keyvaluemaps")],
            E::KeyValueMap { env, name } => {
                vec![lit("e"), encode(env), lit("keyvaluemaps"), encode(name)]
            }
            E::SharedFlows => vec![lit("sharedflows")],
            E::SharedFlowRevision { name, revision } => {
                vec![lit("sharedflows"), encode(name), lit("revisions"), num(revision)]
            }
            E::ApiProducts => vec![lit("apiproducts")],
            E::ApiProduct { name } => vec![lit("apiproducts"), encode(name)],
        }
    }
}

fn encode(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
