//! Database backend implementations.
//!
//! Each backend implements [`ProductStorage`](crate::core::ProductStorage) and
//! [`Backend`](crate::core::Backend) and is gated behind a feature flag.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | PostgreSQL | `postgres` | PostgreSQL with PostGIS for polygon search |

#[cfg(feature = "postgres")]
pub mod postgres;
