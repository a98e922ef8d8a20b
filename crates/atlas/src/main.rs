//! Atlas catalog server
//!
//! Serves the geospatial product catalog over HTTP, backed by PostGIS.

use clap::Parser;
use atlas_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        version = atlas_persistence::VERSION,
        "Starting Atlas catalog server"
    );

    start_postgres(config).await
}

/// Starts the server with the PostgreSQL backend.
#[cfg(feature = "postgres")]
async fn start_postgres(config: ServerConfig) -> anyhow::Result<()> {
    use atlas_persistence::backends::postgres::PostgresBackend;

    let backend = match config.database_url.as_deref() {
        Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
            info!("Initializing PostgreSQL backend from connection string");
            PostgresBackend::from_connection_string(url).await?
        }
        _ => {
            info!("Initializing PostgreSQL backend from environment variables");
            PostgresBackend::from_env().await?
        }
    };

    backend.init_schema().await?;

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when the postgres feature is not enabled.
#[cfg(not(feature = "postgres"))]
async fn start_postgres(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The postgres backend requires the 'postgres' feature. \
         Build with: cargo build -p atlas --features postgres"
    )
}
