//! Authenticated access to the management API
//!
//! # Architecture
//!
//! - [`ApiRequest`] describes a call: verb, relative path, query, body
//! - [`ApiClient`] resolves the path against the base URL, attaches the
//!   bearer token from an [`AccessTokenProvider`] and classifies the status
//! - `TokenManager` from `apigee-common` is the production token provider
//!
//! Every call is attempted once; there is no retry or circuit breaking.

pub mod auth;
pub mod client;
pub mod request;

pub use auth::AccessTokenProvider;
pub use client::{ApiClient, ApiClientBuilder};
pub use request::{ApiRequest, RequestBody};
