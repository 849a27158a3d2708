//! ShipQuote Database Layer
//!
//! This crate provides the rate catalog implementations for the ShipQuote
//! system. It includes:
//!
//! - Connection pool management and embedded migrations with sqlx
//! - `PgRateCatalog`, the PostgreSQL-backed catalog with inclusive range lookups
//! - `InMemoryRateCatalog`, a process-local catalog for tests and database-free runs
//! - Transaction support for the all-or-nothing rate write path

pub mod memory;
pub mod pool;
pub mod repositories;

pub use memory::InMemoryRateCatalog;
pub use pool::{create_pool, run_migrations};
pub use repositories::*;

// Re-export commonly used types
pub use shipquote_core::{AppError, AppResult};
pub use sqlx::PgPool;
