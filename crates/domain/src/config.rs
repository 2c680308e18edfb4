//! Connection settings
//!
//! [`ConnectionConfig`] is the validated, immutable set of values the client
//! needs before it can talk to the management API. It is only obtainable
//! through [`ConnectionConfigBuilder::build`], so holding one means the
//! organization and credentials are present and every URL is well-formed.

use std::fmt;

use url::Url;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TOKEN_URL};
use crate::errors::{ApigeeError, Result};

/// Validated connection settings for one organization
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    org: String,
    username: String,
    password: String,
    base_url: Url,
    token_url: Url,
    proxy: Option<Url>,
}

impl ConnectionConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    /// Configuration using the public Edge endpoints.
    ///
    /// # Errors
    /// Returns [`ApigeeError::Config`] if any value is empty.
    pub fn new(
        org: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder().org(org).username(username).password(password).build()
    }

    #[must_use]
    pub fn org(&self) -> &str {
        &self.org
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Management API root. Always ends with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Outbound HTTP proxy, if one was configured.
    #[must_use]
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("org", &self.org)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .finish()
    }
}

/// Builder for [`ConnectionConfig`].
#[derive(Default, Clone)]
pub struct ConnectionConfigBuilder {
    org: Option<String>,
    username: Option<String>,
    password: Option<String>,
    base_url: Option<String>,
    token_url: Option<String>,
    proxy: Option<String>,
}

impl ConnectionConfigBuilder {
    #[must_use]
    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Override the management API root (defaults to the public Edge API).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Route every request through an HTTP proxy.
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    /// Returns [`ApigeeError::Config`] if the organization, username or
    /// password is missing or blank, or if any supplied URL is not an absolute
    /// `http`/`https` URL with a host.
    pub fn build(self) -> Result<ConnectionConfig> {
        let org = required(self.org, "organization")?;
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;

        let mut base_url =
            parse_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL), "base url")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let token_url =
            parse_url(self.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL), "token url")?;
        let proxy = self.proxy.as_deref().map(|url| parse_url(url, "proxy url")).transpose()?;

        Ok(ConnectionConfig { org, username, password, base_url, token_url, proxy })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApigeeError::Config(format!("missing {field}"))),
    }
}

fn parse_url(raw: &str, label: &str) -> Result<Url> {
    let invalid = || ApigeeError::Config(format!("{label} provided is not valid"));

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(url.scheme(), "http" | "https") || !has_host {
        return Err(invalid());
    }
    Ok(url)
}
