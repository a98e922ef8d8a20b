//! HTTP request handlers for product interactions.
//!
//! - [`create`] - Create a new product
//! - [`read`] - Read a product by ID
//! - [`update`] - Partially update a product
//! - [`delete`] - Delete a product
//! - [`search`] - Search for products
//! - [`health`] - Health, liveness and readiness endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod read;
pub mod search;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use read::read_handler;
pub use search::search_handler;
pub use update::update_handler;
