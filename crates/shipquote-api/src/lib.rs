//! API layer for ShipQuote
//!
//! HTTP handlers for shipping quotes and rate catalog administration.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs
)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

// Re-export handler configuration functions
pub use handlers::{
    configure, configure_health, configure_quotes, configure_rates, json_config, query_config,
};
