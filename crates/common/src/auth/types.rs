//! OAuth 2.0 token types
//!
//! The token endpoint answers with a relative `expires_in`. [`Token`] stores
//! the absolute `expiry_timestamp` instead so cache decisions never depend on
//! when the response was parsed. Any other fields the server returns
//! (`token_type`, `scope`, `jti`, ...) are carried through untouched in
//! [`Token::extra`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OAuth grant used to obtain a token
#[derive(Clone, PartialEq, Eq)]
pub enum GrantType {
    /// Resource-owner password credentials grant.
    Password,
    /// Refresh-token grant, carrying the refresh credential.
    RefreshToken(String),
}

impl GrantType {
    /// Wire value of the `grant_type` form field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::RefreshToken(_) => "refresh_token",
        }
    }
}

impl fmt::Debug for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token endpoint response (RFC 6749 §5.1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, relative to issuance.
    pub expires_in: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// Minimal response, mostly useful in tests.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>, expires_in: i64) -> Self {
        Self { access_token: access_token.into(), refresh_token, expires_in, extra: Map::new() }
    }
}

/// Access token with an absolute expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer credential sent on every management API call
    pub access_token: String,

    /// Present when the server allows the refresh-token grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Unix seconds after which the access token is no longer accepted
    pub expiry_timestamp: i64,

    /// Remaining response fields, minus `expires_in`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    /// Convert a response received at `issued_at` (unix seconds).
    #[must_use]
    pub fn from_response(response: TokenResponse, issued_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expiry_timestamp: issued_at.saturating_add(response.expires_in),
            extra: response.extra,
        }
    }

    /// `true` while the token outlives `now + margin_secs`.
    #[must_use]
    pub fn is_valid_at(&self, now: i64, margin_secs: i64) -> bool {
        self.expiry_timestamp > now.saturating_add(margin_secs)
    }

    #[must_use]
    pub fn seconds_until_expiry(&self, now: i64) -> i64 {
        self.expiry_timestamp - now
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expiry_timestamp, 0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_expires_in_becomes_absolute_timestamp() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "refresh_token": "def",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": "scim.me",
            "jti": "5f1c"
        }))
        .unwrap();

        let token = Token::from_response(response, 1_700_000_000);

        assert_eq!(token.expiry_timestamp, 1_700_003_600);
        assert_eq!(token.refresh_token.as_deref(), Some("def"));
        assert_eq!(token.extra.get("token_type"), Some(&json!("bearer")));
        assert_eq!(token.extra.get("jti"), Some(&json!("5f1c")));

        let serialized = serde_json::to_value(&token).unwrap();
        assert!(serialized.get("expires_in").is_none());
        assert_eq!(serialized["expiry_timestamp"], json!(1_700_003_600));
    }

    #[test]
    fn validity_respects_margin() {
        let token = Token::from_response(TokenResponse::new("abc", None, 100), 1_000);

        assert!(token.is_valid_at(1_000, 30));
        assert!(token.is_valid_at(1_069, 30));
        assert!(!token.is_valid_at(1_070, 30));
        assert!(!token.is_valid_at(1_200, 30));
        assert_eq!(token.seconds_until_expiry(1_040), 60);
    }

    #[test]
    fn expires_at_is_utc_datetime_of_expiry() {
        let token = Token::from_response(TokenResponse::new("abc", None, 3600), 1_700_000_000);

        let expires_at = token.expires_at().unwrap();
        assert_eq!(expires_at.timestamp(), 1_700_003_600);
        assert_eq!(expires_at.to_rfc3339(), "2023-11-14T23:13:20+00:00");
    }

    #[test]
    fn grant_debug_hides_refresh_credential() {
        let grant = GrantType::RefreshToken("very-secret".into());
        assert_eq!(format!("{grant:?}"), "refresh_token");
        assert_eq!(GrantType::Password.as_str(), "password");
    }
}
