//! JSON body extractor.
//!
//! Deserializes request bodies into typed payloads. Unlike `axum::Json`,
//! every malformed or ill-typed body is a 400 with the parser's message.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Axum extractor for a JSON payload of type `T`.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_rest::extractors::JsonBody;
/// use atlas_persistence::types::ProductCreate;
///
/// async fn create_handler(JsonBody(product): JsonBody<ProductCreate>) {
///     println!("Creating {}", product.name);
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Consumes the extractor and returns the payload.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Error type for body extraction failures.
#[derive(Debug)]
pub enum JsonBodyRejection {
    /// The body could not be read (for example it exceeds the size limit).
    Body(BytesRejection),
    /// The body is not valid JSON for the expected type.
    InvalidJson(String),
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        match self {
            JsonBodyRejection::Body(rejection) => rejection.into_response(),
            JsonBodyRejection::InvalidJson(message) => {
                RestError::bad_request(format!("Invalid request body: {}", message))
                    .into_response()
            }
        }
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(JsonBodyRejection::Body)?;

        if bytes.is_empty() {
            return Err(JsonBodyRejection::InvalidJson(
                "request body is empty".to_string(),
            ));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| JsonBodyRejection::InvalidJson(e.to_string()))
    }
}
