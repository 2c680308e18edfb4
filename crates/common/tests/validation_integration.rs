//! Integration tests for validation module

use apigee_common::validation::{
    is_valid_resource_name, require_non_empty, require_revision, NameValidator,
};
use apigee_domain::ApigeeError;

/// Names accepted as path segments
#[test]
fn test_resource_names() {
    for name in ["weather-api", "Orders_v2", "a", "0-9_z"] {
        assert!(is_valid_resource_name(name), "{name:?} should be accepted");
    }
    for name in ["", " ", "weather api", "orders/v2", "x?y", "naïve", "a.b"] {
        assert!(!is_valid_resource_name(name), "{name:?} should be rejected");
    }
}

/// Rejections convert to the domain error with the standard message
#[test]
fn test_rejection_message() {
    let err: ApigeeError = NameValidator::proxy().validate("bad name").unwrap_err().into();
    assert_eq!(err.to_string(), "The proxy name is not valid or it was not specified properly");

    let err: ApigeeError = require_non_empty("cache", "name", "  ").unwrap_err().into();
    assert_eq!(err.to_string(), "The cache name is not valid or it was not specified properly");

    let err: ApigeeError = require_revision("proxy", 0).unwrap_err().into();
    assert!(matches!(err, ApigeeError::Validation { ref parameter, .. } if parameter == "revision"));
    assert!(require_revision("proxy", 1).is_ok());
}
