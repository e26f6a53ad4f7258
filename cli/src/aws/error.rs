//! Classification of CloudFormation client errors
//!
//! The collector only needs to know which of three buckets an error falls in,
//! so SDK errors are folded into [`ClientError`] right at the client boundary.

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Error code returned for a stack which does not exist or a malformed name
pub const VALIDATION_ERROR_CODE: &str = "ValidationError";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The named stack is gone or the request was rejected as invalid
    #[error("ValidationError: {message}")]
    Validation { message: String },

    /// Any other error returned by the service
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// The request never got a service response (timeout, dispatch, etc.)
    #[error("{kind}: {message}")]
    Transport { kind: &'static str, message: String },

    /// The service answered, but not with what the API promises
    #[error("UnexpectedResponse: {message}")]
    Unexpected { message: String },
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }

    /// Errors reported by the service itself, as opposed to the SDK or the network
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Validation { .. } | ClientError::Api { .. })
    }

    pub fn code(&self) -> &str {
        match self {
            ClientError::Validation { .. } => VALIDATION_ERROR_CODE,
            ClientError::Api { code, .. } => code,
            ClientError::Transport { kind, .. } => kind,
            ClientError::Unexpected { .. } => "UnexpectedResponse",
        }
    }
}

/// Classify a service error by its code
pub fn classify_api_error(code: Option<&str>, message: Option<&str>) -> ClientError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(VALIDATION_ERROR_CODE) => ClientError::Validation { message },
        Some(code) => ClientError::Api {
            code: code.to_string(),
            message,
        },
        None => ClientError::Api {
            code: "Unknown".to_string(),
            message,
        },
    }
}

impl<E, R> From<SdkError<E, R>> for ClientError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        let kind = match &error {
            SdkError::ServiceError(context) => {
                let service_error = context.err();
                return classify_api_error(service_error.code(), service_error.message());
            }
            SdkError::TimeoutError(_) => "TimeoutError",
            SdkError::DispatchFailure(_) => "DispatchFailure",
            SdkError::ResponseError(_) => "ResponseError",
            SdkError::ConstructionFailure(_) => "ConstructionFailure",
            _ => "SdkError",
        };

        ClientError::Transport {
            kind,
            message: DisplayErrorContext(&error).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_code() {
        let error = classify_api_error(
            Some("ValidationError"),
            Some("Stack with id S1 does not exist"),
        );

        assert!(error.is_validation());
        assert!(error.is_api());
        assert_eq!(error.to_string(), "ValidationError: Stack with id S1 does not exist");
    }

    #[test]
    fn other_codes_are_api_errors() {
        let error = classify_api_error(Some("AccessDenied"), Some("not authorized"));

        assert!(!error.is_validation());
        assert!(error.is_api());
        assert_eq!(error.code(), "AccessDenied");

        let error = classify_api_error(None, None);
        assert_eq!(
            error,
            ClientError::Api {
                code: "Unknown".into(),
                message: "Unknown error".into()
            }
        );
    }

    #[test]
    fn transport_is_not_api() {
        let error = ClientError::Transport {
            kind: "TimeoutError",
            message: "timed out".into(),
        };

        assert!(!error.is_api());
        assert_eq!(error.code(), "TimeoutError");
    }
}
