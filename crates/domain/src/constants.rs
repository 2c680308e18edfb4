//! Client constants
//!
//! Default endpoints, fixed OAuth client credentials and environment variable
//! names used throughout the client.

// Endpoints
pub const DEFAULT_BASE_URL: &str = "https://api.enterprise.apigee.com";
pub const DEFAULT_TOKEN_URL: &str = "https://login.apigee.com/oauth/token";
pub const API_VERSION_PREFIX: &str = "v1/o";

// OAuth client pair used by the Edge login service for password grants.
// These are public values shipped with Apigee's own CLI, not user secrets.
pub const TOKEN_CLIENT_ID: &str = "edgecli";
pub const TOKEN_CLIENT_SECRET: &str = "edgeclisecret";
pub const TOKEN_ACCEPT_HEADER: &str = "application/json;charset=utf-8";

/// A cached token must stay valid at least this long to be reused.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 30;

// Environment variables
pub const ENV_ORGANIZATION: &str = "APIGEE_ORGANIZATION";
pub const ENV_USERNAME: &str = "APIGEE_USERNAME";
pub const ENV_PASSWORD: &str = "APIGEE_PASSWORD";
pub const ENV_BASE_URL: &str = "APIGEE_BASE_URL";
pub const ENV_TOKEN_URL: &str = "APIGEE_TOKEN_URL";
pub const ENV_PROXY_URL: &str = "APIGEE_PROXY_URL";
