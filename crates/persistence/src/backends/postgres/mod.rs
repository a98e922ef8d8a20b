//! PostgreSQL backend implementation.
//!
//! Products are stored in a single table with a PostGIS polygon column.
//! Connections are pooled with deadpool-postgres; every storage call borrows
//! one client for one round trip.
//!
//! # Example
//!
//! ```no_run
//! use atlas_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
//! use atlas_persistence::core::ProductStorage;
//! use atlas_persistence::types::SearchParameter;
//!
//! # async fn main_example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = PostgresBackend::new(PostgresConfig::default()).await?;
//! backend.init_schema().await?;
//!
//! let everything = backend.search(&SearchParameter::new()).await?;
//! println!("{} products", everything.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE EXTENSION IF NOT EXISTS postgis;
//!
//! CREATE TYPE product_type AS ENUM ('raster', 'rasterized vector', '3d tiles', 'QMesh');
//! CREATE TYPE consumption_protocol AS ENUM ('WMS', 'WMTS', 'XYZ', '3D Tiles');
//!
//! CREATE TABLE IF NOT EXISTS product (
//!     id UUID PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     bounding_polygon geometry(Polygon, 4326) NOT NULL,
//!     consumption_link TEXT NOT NULL,
//!     "type" product_type NOT NULL,
//!     protocol consumption_protocol NOT NULL,
//!     resolution_best DOUBLE PRECISION NOT NULL,
//!     min_zoom INTEGER NOT NULL,
//!     max_zoom INTEGER NOT NULL
//! );
//!
//! CREATE INDEX idx_products_bounding_polygon ON product USING GIST (bounding_polygon);
//! CREATE INDEX idx_products_type ON product ("type");
//! CREATE INDEX idx_products_protocol ON product (protocol);
//! ```

mod backend;
pub(crate) mod schema;
pub mod search;
mod storage;

pub use backend::{PostgresBackend, PostgresConfig, PostgresSslMode};
