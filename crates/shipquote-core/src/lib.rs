//! ShipQuote Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the ShipQuote system. It includes:
//!
//! - Domain models (ShipmentBox, Rate, RateBand, Quote)
//! - The rate catalog and quoting service traits
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
