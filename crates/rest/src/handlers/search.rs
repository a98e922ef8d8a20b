//! Search interaction handler.
//!
//! `POST [base]/products/search`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use atlas_persistence::types::SearchParameter;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// Handler for product search.
///
/// The body names fields and one filter per field; every filter must hold.
/// An empty object returns every product. Result order is unspecified.
///
/// # Response
///
/// - `200 OK` - JSON array of matching products
/// - `400 Bad Request` - Unknown field, duplicate field or invalid literal
///
/// # Example
///
/// ```http
/// POST /products/search HTTP/1.1
/// Content-Type: application/json
///
/// {"type": "raster", "minZoom": {"lessEqual": 10}}
/// ```
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(params): JsonBody<SearchParameter>,
) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    debug!(filters = params.len(), "Processing search request");

    let products = state.storage().search(&params).await?;

    debug!(count = products.len(), "Search complete");

    Ok(Json(products).into_response())
}
