//! Atlas Product Catalog Persistence Layer
//!
//! This crate stores geospatial product records (published map layers with a
//! footprint polygon, serving protocol and zoom range) and answers structured
//! searches over them.
//!
//! # Architecture
//!
//! - [`types`] - Product records and the typed search request
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`backends`] - Backend implementations (PostgreSQL/PostGIS)
//!
//! # Search
//!
//! A search request names fields and, per field, one kind of filter: an exact
//! literal, numeric bounds, or spatial relationships against the footprint.
//! All filters must hold for a product to match.
//!
//! ```
//! use atlas_persistence::types::{ProductField, SearchParameter};
//! use serde_json::json;
//!
//! let params: SearchParameter = serde_json::from_value(json!({
//!     "protocol": "WMTS",
//!     "maxZoom": { "greaterEqual": 15 },
//!     "boundingPolygon": {
//!         "intersects": {
//!             "type": "Polygon",
//!             "coordinates": [[[25, 15], [35, 15], [35, 35], [25, 35], [25, 15]]]
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(params.len(), 3);
//! assert!(params.get(ProductField::MaxZoom).is_some());
//! ```
//!
//! # Backend Features
//!
//! - `postgres` (default) - PostgreSQL with the PostGIS extension

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Product, ProductCreate, ProductUpdate, SearchParameter};

// Re-export core traits
pub use core::{Backend, BackendKind, ProductStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
