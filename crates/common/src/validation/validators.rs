use std::sync::OnceLock;

use regex::Regex;

use super::{ValidationError, ValidationResult};

#[allow(clippy::expect_used)]
fn resource_name_pattern() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Letters, digits, hyphen and underscore only.
        Regex::new(r"^[A-Za-z0-9_-]+$").expect("resource name pattern is a valid literal")
    })
}

/// `true` when `name` is non-empty and only uses `[A-Za-z0-9_-]`.
#[must_use]
pub fn is_valid_resource_name(name: &str) -> bool {
    resource_name_pattern().is_match(name)
}

/// Validator for names that end up as path segments or query values
#[derive(Debug, Clone, Copy)]
pub struct NameValidator {
    resource: &'static str,
    parameter: &'static str,
}

impl NameValidator {
    #[must_use]
    pub const fn new(resource: &'static str, parameter: &'static str) -> Self {
        Self { resource, parameter }
    }

    /// Validator for API proxy names.
    #[must_use]
    pub const fn proxy() -> Self {
        Self::new("proxy", "name")
    }

    /// # Errors
    /// Returns [`ValidationError`] when `value` is empty or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        if is_valid_resource_name(value) {
            Ok(())
        } else {
            Err(ValidationError::new(self.resource, self.parameter))
        }
    }
}

/// # Errors
/// Returns [`ValidationError`] when `value` is empty or whitespace.
pub fn require_non_empty(resource: &str, parameter: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(resource, parameter));
    }
    Ok(())
}

/// Revisions are numbered from 1.
///
/// # Errors
/// Returns [`ValidationError`] for revision `0`.
pub fn require_revision(resource: &str, revision: u32) -> ValidationResult<()> {
    if revision == 0 {
        return Err(ValidationError::new(resource, "revision"));
    }
    Ok(())
}
