//! Seam between the token lifecycle and the token endpoint
//!
//! [`TokenManager`](super::TokenManager) only needs "exchange this grant for a
//! token response". Abstracting that keeps expiry logic testable without an
//! HTTP server.

use async_trait::async_trait;

use super::client::TokenError;
use super::types::{GrantType, TokenResponse};

/// Trait for exchanging an OAuth grant at the token endpoint
#[async_trait]
pub trait TokenGrantClient: Send + Sync {
    /// Perform exactly one token request for `grant`.
    ///
    /// # Errors
    /// Returns [`TokenError::Acquisition`] for any non-200 answer, or a
    /// transport/parse error.
    async fn request_token(&self, grant: &GrantType) -> Result<TokenResponse, TokenError>;
}
