//! PostgreSQL search implementation.
//!
//! Search filters are compiled into `$N`-parameterized PostGIS predicates by
//! [`query_builder::PostgresQueryBuilder`].

pub mod query_builder;
