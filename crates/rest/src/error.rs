//! Error types for the product catalog API.
//!
//! Every error is rendered as a JSON body `{ "message": ..., "details": [...] }`
//! with the matching HTTP status.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | ValidationError | 400 |
//! | Unavailable / ConnectionFailed | 503 |
//! | Other BackendError | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atlas_persistence::error::{BackendError, ResourceError, StorageError, ValidationError};
use serde::Serialize;
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// The resource type (e.g., "Product").
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
        /// Individual problems, if more than one was found.
        details: Vec<String>,
    },

    /// The database cannot be reached (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates a bad request error without details.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource_type, id } => {
                write!(f, "{} {} not found", resource_type, id)
            }
            RestError::BadRequest { message, .. } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable summary.
    pub message: String,
    /// Individual problems.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = match self {
            RestError::BadRequest { message, details } => ErrorBody { message, details },
            RestError::NotFound { .. } => ErrorBody {
                message: self.to_string(),
                details: Vec::new(),
            },
            RestError::ServiceUnavailable { .. } => ErrorBody {
                message: "Database is unavailable".to_string(),
                details: Vec::new(),
            },
            RestError::InternalError { .. } => ErrorBody {
                message: "Internal server error".to_string(),
                details: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => {
                RestError::NotFound { resource_type, id }
            }
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::bad_request(err.to_string())
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. } => {
                RestError::ServiceUnavailable {
                    message: err.to_string(),
                }
            }
            BackendError::MigrationError { .. }
            | BackendError::Internal { .. }
            | BackendError::QueryError { .. }
            | BackendError::SerializationError { .. } => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::NotFound {
                resource_type: "Product".to_string(),
                id: "1".to_string()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::bad_request("nope").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::ServiceUnavailable {
                message: "down".to_string()
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err: RestError = StorageError::Resource(ResourceError::NotFound {
            resource_type: "Product".to_string(),
            id: "abc".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product abc not found");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: RestError = StorageError::Validation(ValidationError::InvalidProduct {
            message: "polygon has no rings".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("polygon has no rings"));
    }

    #[test]
    fn test_connection_failures_map_to_503() {
        let refused: RestError = StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: "connection refused".to_string(),
        })
        .into();
        assert_eq!(refused.status(), StatusCode::SERVICE_UNAVAILABLE);

        let pool: RestError = BackendError::Unavailable {
            backend_name: "postgres".to_string(),
            message: "pool timed out".to_string(),
        }
        .into();
        assert_eq!(pool.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_query_failure_maps_to_500() {
        let err: RestError = BackendError::QueryError {
            message: "syntax error".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let body = ErrorBody {
            message: "bad".to_string(),
            details: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "bad"}));
    }
}
