//! Create interaction handler.
//!
//! `POST [base]/products`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use atlas_persistence::types::ProductCreate;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::RestResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// Body of a successful create response.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Identifier assigned to the new product.
    pub id: Uuid,
}

/// Handler for the create interaction.
///
/// Creates a new product. The server assigns the identifier.
///
/// # Response
///
/// - `201 Created` - `{ "id": "<uuid>" }`
/// - `400 Bad Request` - Invalid payload
/// - `503 Service Unavailable` - Database unreachable
///
/// # Example
///
/// ```http
/// POST /products HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Orthophoto 2024", "description": "...", "boundingPolygon": {...},
///  "consumptionLink": "https://...", "type": "raster", "protocol": "WMTS",
///  "resolutionBest": 0.3, "minZoom": 8, "maxZoom": 18}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(product): JsonBody<ProductCreate>,
) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    info!(
        name = %product.name,
        description = %product.description,
        "Creating new product"
    );

    let created = state.storage().create(product).await?;

    info!(id = %created.id, "Product created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: created.id })).into_response())
}
