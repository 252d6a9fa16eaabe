use super::ResolveResponse;
use crate::resolver::ResolveError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Message returned to callers for unexpected failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur while serving a resolution request
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body did not decode to the expected shape
    #[error("{0}")]
    InvalidRequest(String),

    /// Resolver rejected the prompt or failed internally
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Prompt exceeds the accepted size
    #[error("prompt is too large ({length} characters, maximum is {max})")]
    PromptTooLarge { length: usize, max: usize },

    /// Request body exceeded the buffering limit before the prompt could be read
    #[error("prompt is too large (request body exceeds {limit} bytes)")]
    BodyTooLarge { limit: usize },

    /// Resolver output failed the manifest shape check
    #[error("Resolver returned an invalid manifest: {0}")]
    ContractViolation(String),

    /// Any other failure, such as a panicked worker
    #[error("Unexpected failure: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Resolve(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            ServiceError::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::PromptTooLarge { .. } | ServiceError::BodyTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ServiceError::ContractViolation(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message safe to send to the caller
    ///
    /// Internal failures are reduced to a generic message.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::ContractViolation(_) => "Invalid manifest returned by resolver".to_string(),
            _ if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ResolveResponse::failure(self.client_message())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Resolve(ResolveError::EmptyInput).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Resolve(ResolveError::InvalidInputType { found: "number" }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::PromptTooLarge { length: 4097, max: 4096 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServiceError::BodyTooLarge { limit: 2_097_152 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServiceError::ContractViolation("missing keys".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServiceError::Internal("panic".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rule_errors_are_internal() {
        let err = ServiceError::Resolve(ResolveError::InvalidRule {
            trigger: "c++".into(),
            reason: "bad".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_messages_hide_internal_detail() {
        let internal = ServiceError::Internal("worker panicked at src/secret.rs".into());
        assert_eq!(internal.client_message(), "Internal server error");

        let violation = ServiceError::ContractViolation("[RequiredKeys] missing stack".into());
        assert_eq!(violation.client_message(), "Invalid manifest returned by resolver");

        let empty = ServiceError::Resolve(ResolveError::EmptyInput);
        assert_eq!(empty.client_message(), "prompt must not be empty");
        assert!(empty.is_client_error());
    }
}
