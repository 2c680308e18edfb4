//! Mock implementations of common traits
//!
//! [`MockTokenClient`] stands in for the OAuth token endpoint. Clones share
//! state, so a test can hand one clone to a `TokenManager` and keep another
//! to inspect the grants it received.

#![allow(clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::auth::{GrantType, TokenError, TokenGrantClient, TokenResponse};

/// Scripted answer for the next token request
#[derive(Debug, Clone)]
pub enum TokenReply {
    Issue(TokenResponse),
    Reject { status: u16, body: String },
}

impl TokenReply {
    pub fn issue(access_token: impl Into<String>, refresh_token: Option<&str>, expires_in: i64) -> Self {
        Self::Issue(TokenResponse::new(access_token, refresh_token.map(str::to_string), expires_in))
    }

    pub fn reject(status: u16, body: impl Into<String>) -> Self {
        Self::Reject { status, body: body.into() }
    }
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<TokenReply>,
    grants: Vec<GrantType>,
    issued: usize,
}

/// In-memory token endpoint
///
/// Scripted replies are consumed first. Once the script is empty every
/// request succeeds with `token-{n}` / `refresh-{n}`, where `n` counts the
/// tokens issued so far.
#[derive(Debug, Clone)]
pub struct MockTokenClient {
    state: Arc<Mutex<MockState>>,
    lifetime_secs: i64,
    issue_refresh_token: bool,
    delay: Option<Duration>,
}

impl Default for MockTokenClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTokenClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            lifetime_secs: 3600,
            issue_refresh_token: true,
            delay: None,
        }
    }

    /// `expires_in` of generated tokens.
    #[must_use]
    pub fn with_lifetime(mut self, secs: i64) -> Self {
        self.lifetime_secs = secs;
        self
    }

    /// Generated tokens carry no refresh token.
    #[must_use]
    pub fn without_refresh_token(mut self) -> Self {
        self.issue_refresh_token = false;
        self
    }

    /// Sleep before answering, to widen race windows.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_reply(&self, reply: TokenReply) {
        self.state.lock().scripted.push_back(reply);
    }

    /// Number of requests received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.lock().grants.len()
    }

    /// Grants received, in order.
    #[must_use]
    pub fn grants(&self) -> Vec<GrantType> {
        self.state.lock().grants.clone()
    }

    fn next_reply(&self, grant: &GrantType) -> TokenReply {
        let mut state = self.state.lock();
        state.grants.push(grant.clone());
        if let Some(reply) = state.scripted.pop_front() {
            if matches!(reply, TokenReply::Issue(_)) {
                state.issued += 1;
            }
            return reply;
        }

        state.issued += 1;
        let n = state.issued;
        let refresh = self.issue_refresh_token.then(|| format!("refresh-{n}"));
        TokenReply::Issue(TokenResponse::new(format!("token-{n}"), refresh, self.lifetime_secs))
    }
}

#[async_trait]
impl TokenGrantClient for MockTokenClient {
    async fn request_token(&self, grant: &GrantType) -> Result<TokenResponse, TokenError> {
        let reply = self.next_reply(grant);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            TokenReply::Issue(response) => Ok(response),
            TokenReply::Reject { status, body } => Err(TokenError::Acquisition {
                status,
                message: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
                body,
            }),
        }
    }
}
