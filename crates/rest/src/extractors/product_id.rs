//! Product identifier extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::RestError;

/// The `{id}` path segment, parsed as a UUID.
///
/// A segment that is not a UUID is rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub Uuid);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::bad_request(e.body_text()))?;

        Uuid::parse_str(&raw)
            .map(ProductId)
            .map_err(|_| RestError::bad_request(format!("Invalid product id '{}'", raw)))
    }
}
