//! Configuration loader
//!
//! Builds a validated [`ConnectionConfig`] from environment variables.
//!
//! ## Loading Strategy
//! 1. [`load`] reads a `.env` file from the working directory, if present
//! 2. Process environment variables are read (they win over `.env` values)
//! 3. Values are validated by [`ConnectionConfigBuilder::build`]
//!
//! ## Environment Variables
//! - `APIGEE_ORGANIZATION`: organization name (required)
//! - `APIGEE_USERNAME`: Edge account username (required)
//! - `APIGEE_PASSWORD`: Edge account password (required)
//! - `APIGEE_BASE_URL`: management API root (optional)
//! - `APIGEE_TOKEN_URL`: OAuth token endpoint (optional)
//! - `APIGEE_PROXY_URL`: outbound HTTP proxy (optional)
//!
//! Empty values are treated as unset.
//!
//! [`ConnectionConfigBuilder::build`]: apigee_domain::ConnectionConfigBuilder::build

use std::collections::HashMap;
use std::path::Path;

use apigee_domain::constants::{
    ENV_BASE_URL, ENV_ORGANIZATION, ENV_PASSWORD, ENV_PROXY_URL, ENV_TOKEN_URL, ENV_USERNAME,
};
use apigee_domain::{ApigeeError, ConnectionConfig, Result};

/// Load configuration from `.env` and the process environment.
///
/// # Errors
/// Returns `ApigeeError::Config` if the `.env` file exists but cannot be
/// parsed, or if the resulting values are missing or invalid.
pub fn load() -> Result<ConnectionConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => return Err(ApigeeError::Config(format!("failed to read .env file: {e}"))),
    }
    load_from_env()
}

/// Load configuration from process environment variables only.
///
/// # Errors
/// Returns `ApigeeError::Config` if required variables are missing or any
/// value is invalid.
pub fn load_from_env() -> Result<ConnectionConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration from a dotenv-format file only.
///
/// The file's values are not exported to the process environment.
///
/// # Errors
/// Returns `ApigeeError::Config` if the file cannot be read or parsed, or if
/// required values are missing or invalid.
pub fn load_from_file(path: &Path) -> Result<ConnectionConfig> {
    let read_error =
        |err: dotenvy::Error| ApigeeError::Config(format!("failed to read {}: {err}", path.display()));

    let vars = dotenvy::from_path_iter(path)
        .map_err(read_error)?
        .collect::<std::result::Result<HashMap<String, String>, _>>()
        .map_err(read_error)?;
    tracing::debug!(path = %path.display(), count = vars.len(), "read config file");

    load_from_lookup(|key| vars.get(key).cloned())
}

/// Load configuration through an arbitrary variable lookup.
///
/// # Errors
/// Returns `ApigeeError::Config` if required variables are missing or any
/// value is invalid.
pub fn load_from_lookup<F>(lookup: F) -> Result<ConnectionConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let required = |key: &str| {
        var(key).ok_or_else(|| ApigeeError::Config(format!("Missing environment variable: {key}")))
    };

    let mut builder = ConnectionConfig::builder()
        .org(required(ENV_ORGANIZATION)?)
        .username(required(ENV_USERNAME)?)
        .password(required(ENV_PASSWORD)?);

    if let Some(url) = var(ENV_BASE_URL) {
        builder = builder.base_url(url);
    }
    if let Some(url) = var(ENV_TOKEN_URL) {
        builder = builder.token_url(url);
    }
    if let Some(url) = var(ENV_PROXY_URL) {
        builder = builder.proxy(url);
    }

    let config = builder.build()?;
    tracing::info!(org = config.org(), base_url = %config.base_url(), "configuration loaded");
    Ok(config)
}
