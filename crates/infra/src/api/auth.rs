//! Bearer token source for the request dispatcher

use apigee_common::auth::{TokenGrantClient, TokenManager};
use apigee_domain::ApigeeError;
use async_trait::async_trait;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// Implementations handle regeneration when the cached token is close to
    /// expiry.
    async fn access_token(&self) -> Result<String, ApigeeError>;
}

#[async_trait]
impl<C> AccessTokenProvider for TokenManager<C>
where
    C: TokenGrantClient + 'static,
{
    async fn access_token(&self) -> Result<String, ApigeeError> {
        self.get_access_token().await.map_err(ApigeeError::from)
    }
}
