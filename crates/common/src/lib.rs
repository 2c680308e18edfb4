//! Shared building blocks for the Apigee client.
//!
//! - [`auth`]: OAuth2 password/refresh grants and the cached token lifecycle
//! - [`time`]: clock abstraction so expiry decisions can be tested
//! - [`validation`]: input checks run before any request is sent
//! - `testing` (feature `test-utils`): mock clock and token client

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod time;
pub mod validation;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use auth::{GrantType, Token, TokenClient, TokenError, TokenGrantClient, TokenManager};
pub use time::{Clock, SystemClock};
pub use validation::{ValidationError, ValidationResult};
