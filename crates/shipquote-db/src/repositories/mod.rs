//! Repository implementations
//!
//! This module contains the PostgreSQL implementation of the catalog trait
//! defined in shipquote-core, using sqlx.

pub mod rate_repo;

pub use rate_repo::PgRateCatalog;
