//! Error types used throughout the client

use serde_json::Value;
use thiserror::Error;

/// Main error type for the Apigee client
#[derive(Error, Debug)]
pub enum ApigeeError {
    /// Missing or malformed connection settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input to a resource method. No request was sent.
    #[error("The {resource} {parameter} is not valid or it was not specified properly")]
    Validation { resource: String, parameter: String },

    /// The token endpoint answered with something other than 200.
    #[error("Token acquisition failed with status {status}: {message}")]
    TokenAcquisition { status: u16, message: String, body: String },

    /// A management API call answered with status >= 400.
    #[error("API request failed with status {status}: {status_text}")]
    ApiRequest { status: u16, status_text: String, body: Value },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ApigeeError {
    /// Build a validation error for `resource`'s `parameter`.
    pub fn validation(resource: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::Validation { resource: resource.into(), parameter: parameter.into() }
    }

    /// HTTP status carried by the error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TokenAcquisition { status, .. } | Self::ApiRequest { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Stable label suitable for logging fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation { .. } => "validation",
            Self::TokenAcquisition { .. } => "token_acquisition",
            Self::ApiRequest { .. } => "api_request",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApigeeError>;
