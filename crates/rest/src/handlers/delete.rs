//! Delete interaction handler.
//!
//! `DELETE [base]/products/{id}`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ProductId;
use crate::state::AppState;

/// Handler for the delete interaction.
///
/// Deletion is permanent.
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `400 Bad Request` - The id is not a UUID
/// - `404 Not Found` - No product has the id
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    ProductId(id): ProductId,
) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    debug!(id = %id, "Processing delete request");

    state.storage().delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
