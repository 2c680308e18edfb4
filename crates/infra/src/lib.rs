//! # Apigee Infrastructure
//!
//! I/O side of the Apigee Edge management client.
//!
//! This crate contains:
//! - Environment/`.env` configuration loading
//! - The reqwest-backed HTTP transport
//! - The authenticated request dispatcher (`api`)
//! - The resource facade (`management::Apigee`)
//! - Tracing subscriber bootstrap
//!
//! ## Architecture
//! - Token lifecycle comes from `apigee-common`
//! - Errors surface as `apigee_domain::ApigeeError`

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod management;

// Re-export commonly used items
pub use api::{AccessTokenProvider, ApiClient, ApiRequest, RequestBody};
pub use http::HttpClient;
pub use management::{Apigee, Endpoint};
