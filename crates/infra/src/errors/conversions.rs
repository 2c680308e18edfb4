//! Conversions from external infrastructure errors into domain errors.

use apigee_domain::ApigeeError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApigeeError);

impl From<InfraError> for ApigeeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApigeeError> for InfraError {
    fn from(value: ApigeeError) -> Self {
        InfraError(value)
    }
}

trait IntoApigeeError {
    fn into_apigee(self) -> ApigeeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApigeeError */
/* -------------------------------------------------------------------------- */

impl IntoApigeeError for HttpError {
    fn into_apigee(self) -> ApigeeError {
        if self.is_timeout() {
            return ApigeeError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ApigeeError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return ApigeeError::Decode(self.to_string());
        }

        if self.is_builder() {
            return ApigeeError::Config(format!("invalid HTTP request: {self}"));
        }

        ApigeeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_apigee())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ApigeeError */
/* -------------------------------------------------------------------------- */

impl IntoApigeeError for std::io::Error {
    fn into_apigee(self) -> ApigeeError {
        ApigeeError::Io(self.to_string())
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_apigee())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
