//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates resource state errors, request
//! validation errors and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if the error means the storage engine could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Backend(
                BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. }
            )
        )
    }
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound { resource_type: String, id: String },
}

/// Errors related to request validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The product payload failed validation.
    #[error("invalid product: {message}")]
    InvalidProduct { message: String },

    /// The search parameter is invalid.
    #[error("invalid search parameter '{parameter}': {message}")]
    InvalidSearchParameter { parameter: String, message: String },
}

/// Errors from the underlying database.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for StorageError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            return StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "postgres".to_string(),
                message: err.to_string(),
            });
        }
        StorageError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Resource(ResourceError::NotFound {
            resource_type: "Product".to_string(),
            id: "123".to_string(),
        });
        assert_eq!(err.to_string(), "resource not found: Product/123");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidSearchParameter {
            parameter: "colour".to_string(),
            message: "unknown search field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid search parameter 'colour': unknown search field"
        );
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection failed to postgres"));
    }

    #[test]
    fn test_is_unavailable() {
        let unavailable = StorageError::Backend(BackendError::Unavailable {
            backend_name: "postgres".to_string(),
            message: "pool timed out".to_string(),
        });
        assert!(unavailable.is_unavailable());

        let query = StorageError::Backend(BackendError::QueryError {
            message: "syntax error".to_string(),
        });
        assert!(!query.is_unavailable());

        let not_found = StorageError::Resource(ResourceError::NotFound {
            resource_type: "Product".to_string(),
            id: "abc".to_string(),
        });
        assert!(!not_found.is_unavailable());
    }

    #[test]
    fn test_storage_error_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let storage: StorageError = err.into();
        assert!(matches!(
            storage,
            StorageError::Backend(BackendError::SerializationError { .. })
        ));
    }
}
