//! Token manager with on-demand regeneration
//!
//! Owns the single cached [`Token`] for a connection:
//! - hands out the cached token while it outlives the expiry margin
//! - regenerates through the refresh grant when a refresh token is held
//! - falls back to the password grant once if the refresh grant is rejected
//!
//! The slot is guarded by an async mutex held across the whole
//! check-and-regenerate step, so concurrent callers that all observe an
//! expiring token produce exactly one token request between them.

use std::sync::Arc;

use apigee_domain::constants::TOKEN_EXPIRY_MARGIN_SECS;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::client::TokenError;
use super::traits::TokenGrantClient;
use super::types::{GrantType, Token};
use crate::time::{Clock, SystemClock};

/// Cached OAuth token for one set of credentials
pub struct TokenManager<C: TokenGrantClient> {
    client: C,
    clock: Arc<dyn Clock>,
    current: Mutex<Option<Arc<Token>>>,
    expiry_margin_secs: i64,
}

impl<C: TokenGrantClient> TokenManager<C> {
    /// Create a manager using the system clock and the default 30 second
    /// expiry margin.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_clock(client, Arc::new(SystemClock))
    }

    /// Create a manager reading time from `clock`.
    #[must_use]
    pub fn with_clock(client: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            clock,
            current: Mutex::new(None),
            expiry_margin_secs: TOKEN_EXPIRY_MARGIN_SECS,
        }
    }

    /// Treat tokens as expired this many seconds early.
    #[must_use]
    pub fn with_expiry_margin(mut self, secs: i64) -> Self {
        self.expiry_margin_secs = secs;
        self
    }

    #[must_use]
    pub fn expiry_margin_secs(&self) -> i64 {
        self.expiry_margin_secs
    }

    /// Return a token valid for at least the expiry margin.
    ///
    /// The cached token is returned as-is while
    /// `expiry_timestamp > now + margin`. Otherwise a new token is obtained
    /// and replaces the cached one.
    ///
    /// # Errors
    /// Propagates the [`TokenError`] of the final grant attempt. The cached
    /// token is left unchanged on failure.
    pub async fn get_token(&self) -> Result<Arc<Token>, TokenError> {
        let mut slot = self.current.lock().await;
        let now = self.clock.unix_timestamp();

        if let Some(token) = slot.as_ref() {
            if token.is_valid_at(now, self.expiry_margin_secs) {
                debug!(
                    expires_in_secs = token.seconds_until_expiry(now),
                    "using cached access token"
                );
                return Ok(Arc::clone(token));
            }
            debug!(expiry_timestamp = token.expiry_timestamp, now, "access token expiring, regenerating");
        }

        let refresh_token = slot.as_ref().and_then(|t| t.refresh_token.clone());
        let token = self.regenerate_locked(refresh_token).await?;
        *slot = Some(Arc::clone(&token));
        Ok(token)
    }

    /// Convenience wrapper returning only the bearer credential.
    ///
    /// # Errors
    /// See [`TokenManager::get_token`].
    pub async fn get_access_token(&self) -> Result<String, TokenError> {
        Ok(self.get_token().await?.access_token.clone())
    }

    /// Obtain a new token regardless of the cached token's validity.
    ///
    /// # Errors
    /// See [`TokenManager::get_token`].
    pub async fn regenerate(&self) -> Result<Arc<Token>, TokenError> {
        let mut slot = self.current.lock().await;
        let refresh_token = slot.as_ref().and_then(|t| t.refresh_token.clone());
        let token = self.regenerate_locked(refresh_token).await?;
        *slot = Some(Arc::clone(&token));
        Ok(token)
    }

    /// Cached token, without checking expiry or contacting the server.
    pub async fn current_token(&self) -> Option<Arc<Token>> {
        self.current.lock().await.clone()
    }

    /// Drop the cached token. The next call performs a password grant.
    pub async fn clear(&self) {
        *self.current.lock().await = None;
        debug!("cached access token cleared");
    }

    async fn regenerate_locked(&self, refresh_token: Option<String>) -> Result<Arc<Token>, TokenError> {
        if let Some(refresh_token) = refresh_token {
            match self.generate_token(&GrantType::RefreshToken(refresh_token)).await {
                Ok(token) => return Ok(token),
                Err(TokenError::Acquisition { status, .. }) => {
                    warn!(status, "refresh grant rejected, falling back to password grant");
                }
                Err(e) => return Err(e),
            }
        }
        self.generate_token(&GrantType::Password).await
    }

    async fn generate_token(&self, grant: &GrantType) -> Result<Arc<Token>, TokenError> {
        let response = self.client.request_token(grant).await?;
        let issued_at = self.clock.unix_timestamp();
        let token = Token::from_response(response, issued_at);

        info!(
            grant_type = grant.as_str(),
            expires_at = ?token.expires_at(),
            has_refresh_token = token.refresh_token.is_some(),
            "access token issued"
        );
        Ok(Arc::new(token))
    }
}

impl<C: TokenGrantClient> std::fmt::Debug for TokenManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("expiry_margin_secs", &self.expiry_margin_secs)
            .finish_non_exhaustive()
    }
}
