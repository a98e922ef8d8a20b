//! Core storage traits.
//!
//! [`ProductStorage`] is the contract the HTTP layer depends on;
//! [`Backend`] covers driver lifecycle (health, schema initialization).

pub mod backend;
pub mod storage;

// Re-export main types
pub use backend::{Backend, BackendKind};
pub use storage::ProductStorage;
