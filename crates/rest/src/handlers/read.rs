//! Read interaction handler.
//!
//! `GET [base]/products/{id}`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::ProductId;
use crate::state::AppState;

/// Handler for the read interaction.
///
/// # Response
///
/// - `200 OK` - The product
/// - `400 Bad Request` - The id is not a UUID
/// - `404 Not Found` - No product has the id
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    ProductId(id): ProductId,
) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    debug!(id = %id, "Processing read request");

    match state.storage().read(id).await? {
        Some(product) => Ok(Json(product).into_response()),
        None => Err(RestError::NotFound {
            resource_type: "Product".to_string(),
            id: id.to_string(),
        }),
    }
}
