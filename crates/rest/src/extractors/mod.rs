//! Axum extractors for product requests.
//!
//! - [`JsonBody`] - Parse a JSON request body, rejecting malformed input with 400
//! - [`ProductId`] - Parse the `{id}` path segment as a UUID

mod json_body;
mod product_id;

pub use json_body::{JsonBody, JsonBodyRejection};
pub use product_id::ProductId;
