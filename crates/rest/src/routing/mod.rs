//! Route configuration for the product catalog API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod product_routes;

pub use product_routes::create_routes;
