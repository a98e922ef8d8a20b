//! PostgreSQL schema definitions and migrations.

use crate::error::{BackendError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema.
pub async fn initialize_schema(client: &deadpool_postgres::Client) -> StorageResult<()> {
    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        create_schema_v1(client).await?;
        set_schema_version(client, 1).await?;
        migrate_schema(client, 1).await?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(client, current_version).await?;
    }

    tracing::debug!(version = SCHEMA_VERSION, "PostgreSQL schema ready");
    Ok(())
}

/// Get the current schema version.
async fn get_schema_version(client: &deadpool_postgres::Client) -> StorageResult<i32> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create schema_version table: {}", e)))?;

    let row = client
        .query_opt("SELECT version FROM schema_version LIMIT 1", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to query schema version: {}", e)))?;

    Ok(row.map(|r| r.get::<_, i32>(0)).unwrap_or(0))
}

/// Set the schema version.
async fn set_schema_version(client: &deadpool_postgres::Client, version: i32) -> StorageResult<()> {
    client
        .execute("DELETE FROM schema_version", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to clear schema_version: {}", e)))?;

    client
        .execute(
            "INSERT INTO schema_version (version) VALUES ($1)",
            &[&version],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1): PostGIS, enum types and the
/// product table.
async fn create_schema_v1(client: &deadpool_postgres::Client) -> StorageResult<()> {
    client
        .execute("CREATE EXTENSION IF NOT EXISTS postgis", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to enable postgis: {}", e)))?;

    // CREATE TYPE has no IF NOT EXISTS form.
    client
        .batch_execute(
            "DO $$ BEGIN
                CREATE TYPE product_type AS ENUM ('raster', 'rasterized vector', '3d tiles', 'QMesh');
            EXCEPTION WHEN duplicate_object THEN NULL;
            END $$;
            DO $$ BEGIN
                CREATE TYPE consumption_protocol AS ENUM ('WMS', 'WMTS', 'XYZ', '3D Tiles');
            EXCEPTION WHEN duplicate_object THEN NULL;
            END $$;",
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create enum types: {}", e)))?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS product (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                bounding_polygon geometry(Polygon, 4326) NOT NULL,
                consumption_link TEXT NOT NULL,
                \"type\" product_type NOT NULL,
                protocol consumption_protocol NOT NULL,
                resolution_best DOUBLE PRECISION NOT NULL,
                min_zoom INTEGER NOT NULL,
                max_zoom INTEGER NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create product table: {}", e)))?;

    Ok(())
}

/// Run migrations from a specific version.
async fn migrate_schema(
    client: &deadpool_postgres::Client,
    from_version: i32,
) -> StorageResult<()> {
    let mut version = from_version;

    while version < SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(client).await?,
            _ => {
                return Err(pg_error(format!("Unknown schema version: {}", version)));
            }
        }
        version += 1;
        set_schema_version(client, version).await?;
        tracing::info!(version, "Migrated PostgreSQL schema");
    }

    Ok(())
}

/// Version 2: search indexes.
async fn migrate_v1_to_v2(client: &deadpool_postgres::Client) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_products_bounding_polygon ON product USING GIST (bounding_polygon)",
        "CREATE INDEX IF NOT EXISTS idx_products_type ON product (\"type\")",
        "CREATE INDEX IF NOT EXISTS idx_products_protocol ON product (protocol)",
    ];

    for sql in indexes {
        client
            .execute(sql, &[])
            .await
            .map_err(|e| pg_error(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}

fn pg_error(message: String) -> crate::error::StorageError {
    crate::error::StorageError::Backend(BackendError::MigrationError { message })
}
