//! Error types for ennode-web
//!
//! Backend failures are converted here into the four page-level error
//! classes before they reach a response: validation, rate limiting, server
//! error, and not found.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::client::{ClientError, ErrorKind};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Input rejected (422)
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: HashMap<String, Vec<String>>,
    },

    /// Backend throttled the request (429)
    #[error("Too many requests: {0}")]
    RateLimited(String),

    /// Backend or unclassified failure (500)
    #[error("Server error: {0}")]
    Server(String),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        if err.status() == Some(404) {
            return ApiError::NotFound(err.to_string());
        }

        match (err.kind(), err) {
            (ErrorKind::Validation, ClientError::Validation { message, errors }) => {
                ApiError::Validation { message, errors }
            }
            (ErrorKind::RateLimited, err) => ApiError::RateLimited(err.to_string()),
            (_, err) => {
                warn!(error = %err, "Backend request failed");
                ApiError::Server(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, errors) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Validation { message, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                message,
                Some(errors),
            ),
            ApiError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg, None)
            }
            ApiError::Server(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
                None,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "errors": errors,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_maps_to_not_found() {
        let err: ApiError = ClientError::Status(404, "missing".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_validation_keeps_field_errors() {
        let mut errors = HashMap::new();
        errors.insert("email".to_string(), vec!["Invalid email".to_string()]);
        let err: ApiError = ClientError::Validation {
            message: "Invalid".to_string(),
            errors,
        }
        .into();

        match err {
            ApiError::Validation { errors, .. } => assert_eq!(errors["email"].len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unclassified_becomes_server_error() {
        let err: ApiError = ClientError::Network("connection refused".to_string()).into();
        assert!(matches!(err, ApiError::Server(_)));

        let err: ApiError = ClientError::Status(503, String::new()).into();
        assert!(matches!(err, ApiError::Server(_)));
    }

    #[test]
    fn test_response_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::RateLimited(String::new()).into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Server(String::new()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
