//! Product route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use atlas_persistence::core::ProductStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all product API routes.
///
/// # Routes
///
/// ## Products
/// - `POST /products` - Create
/// - `POST /products/search` - Search
/// - `GET /products/{id}` - Read
/// - `PUT /products/{id}` - Partial update
/// - `DELETE /products/{id}` - Delete
///
/// ## Probes
/// - `GET /health` - Health check
/// - `GET /liveness` - Liveness probe
/// - `GET /readiness` - Readiness probe (pings the database)
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ProductStorage + Send + Sync + 'static,
{
    Router::new()
        // Probes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/liveness", get(handlers::liveness_handler))
        .route("/readiness", get(handlers::readiness_handler::<S>))
        // Collection routes
        .route("/products", post(handlers::create_handler::<S>))
        .route("/products/search", post(handlers::search_handler::<S>))
        // Instance routes
        .route(
            "/products/{id}",
            get(handlers::read_handler::<S>)
                .put(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .with_state(state)
}
