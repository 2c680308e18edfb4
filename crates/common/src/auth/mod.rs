//! OAuth 2.0 token acquisition for the management API
//!
//! The Edge login service issues short-lived bearer tokens through the OAuth2
//! password grant and renews them through the refresh-token grant. This
//! module owns that lifecycle so callers only ever ask for "a token that is
//! still good".
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   TokenManager   │  Cached token + expiry decisions (single-flight)
//! └────────┬─────────┘
//!          │ TokenGrantClient
//!          ▼
//! ┌──────────────────┐
//! │   TokenClient    │  POST <token_url>, form body, HTTP Basic client auth
//! └──────────────────┘
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use apigee_common::auth::{TokenClient, TokenManager};
//! use apigee_domain::ConnectionConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::new("acme", "ops@acme.test", "s3cret")?;
//! let manager = TokenManager::new(TokenClient::from_config(&config)?);
//!
//! // First call performs a password grant, later calls reuse the token
//! // until it is within 30 seconds of expiry.
//! let token = manager.get_token().await?;
//! assert!(!token.access_token.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `Token`, `TokenResponse`, `GrantType`
//! - **[`client`]**: reqwest-backed token endpoint client and `TokenError`
//! - **[`token_manager`]**: cached token lifecycle
//! - **[`traits`]**: `TokenGrantClient` seam for tests

pub mod client;
pub mod token_manager;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use client::{PasswordCredentials, TokenClient, TokenError};
pub use token_manager::TokenManager;
pub use traits::TokenGrantClient;
pub use types::{GrantType, Token, TokenResponse};
