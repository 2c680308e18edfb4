//! Input validation for resource methods
//!
//! Checks here run before a request is built. A failure surfaces as
//! [`apigee_domain::ApigeeError::Validation`] and no network call is made.

mod validators;

use apigee_domain::ApigeeError;
use thiserror::Error;

pub use validators::{is_valid_resource_name, require_non_empty, require_revision, NameValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A rejected input, identified by resource kind and parameter name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The {resource} {parameter} is not valid or it was not specified properly")]
pub struct ValidationError {
    pub resource: String,
    pub parameter: String,
}

impl ValidationError {
    pub fn new(resource: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self { resource: resource.into(), parameter: parameter.into() }
    }
}

impl From<ValidationError> for ApigeeError {
    fn from(err: ValidationError) -> Self {
        ApigeeError::validation(err.resource, err.parameter)
    }
}
