//! Update interaction handler.
//!
//! `PUT [base]/products/{id}`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use atlas_persistence::types::ProductUpdate;
use tracing::info;

use crate::error::RestResult;
use crate::extractors::{JsonBody, ProductId};
use crate::state::AppState;

/// Handler for the update interaction.
///
/// Applies a partial update: fields absent from the body keep their stored
/// values.
///
/// # Response
///
/// - `204 No Content` - Updated
/// - `400 Bad Request` - Invalid id or payload
/// - `404 Not Found` - No product has the id
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    ProductId(id): ProductId,
    JsonBody(changes): JsonBody<ProductUpdate>,
) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    info!(id = %id, changes = ?changes, "Updating product");

    state.storage().update(id, changes).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
