//! # atlas-rest - HTTP API for the Atlas product catalog
//!
//! This crate exposes the geospatial product catalog over HTTP: create, read,
//! partially update and delete products, and search them with equality,
//! numeric range and spatial filters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atlas_rest::{create_app, ServerConfig};
//! use atlas_persistence::backends::postgres::PostgresBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = PostgresBackend::from_env().await?;
//!     backend.init_schema().await?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern | Success |
//! |------------|-------------|-------------|---------|
//! | create | POST | `/products` | 201 `{ "id": ... }` |
//! | search | POST | `/products/search` | 200 array |
//! | read | GET | `/products/{id}` | 200 product |
//! | update | PUT | `/products/{id}` | 204 |
//! | delete | DELETE | `/products/{id}` | 204 |
//! | health | GET | `/health` | 200 |
//! | liveness | GET | `/liveness` | 200 |
//! | readiness | GET | `/readiness` | 200 / 503 |
//!
//! ## Error Handling
//!
//! Errors are returned as `{ "message": ..., "details": [...] }`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Malformed body, invalid id, unknown or duplicate search field |
//! | 404 | No product has the id |
//! | 408 | Request timed out |
//! | 413 | Body exceeds the size limit |
//! | 500 | Unexpected database failure |
//! | 503 | Database unreachable |
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ATLAS_SERVER_PORT` | 8080 | Server port |
//! | `ATLAS_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ATLAS_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `ATLAS_MAX_BODY_SIZE` | 10485760 | Max request body size (bytes) |
//! | `ATLAS_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ATLAS_ENABLE_CORS` | true | Enable CORS |
//! | `ATLAS_CORS_ORIGINS` | * | Allowed CORS origins |
//! | `ATLAS_DATABASE_URL` | - | PostgreSQL connection string |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and HTTP status mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`extractors`] - Axum extractors for JSON bodies and product ids
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use atlas_persistence::core::ProductStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: ProductStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up the product routes, the body size limit, tracing, the request
/// timeout and (if enabled) CORS.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: false,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: ProductStorage + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    let state = AppState::new(Arc::new(storage), config.clone());

    let router =
        routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "atlas={level},atlas_rest={level},atlas_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
