//! Common traits for the rate catalog and quoting services
//!
//! Defines abstractions for catalog access and business logic.

use crate::error::AppError;
use crate::models::{BandMatch, NewRate, Quote, Rate, ShipmentBox};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

/// Storage of rates and their weight bands
///
/// Readers must never observe a rate without its bands.
#[async_trait]
pub trait RateCatalog: Send + Sync {
    /// Find every band on the route whose inclusive weight interval contains `weight_kg`
    ///
    /// Results come back in catalog iteration order, one entry per band.
    async fn lookup_bands(
        &self,
        starting_country: &str,
        destination_country: &str,
        weight_kg: Decimal,
    ) -> Result<Vec<BandMatch>, AppError>;

    /// Atomically create a rate together with all of its bands
    async fn create_rate_with_bands(&self, rate: &NewRate) -> Result<Rate, AppError>;

    /// Find a rate (with bands) by ID
    async fn find_rate(&self, id: i32) -> Result<Option<Rate>, AppError>;

    /// List rates (with bands) with pagination
    async fn list_rates(&self, limit: i64, offset: i64) -> Result<Vec<Rate>, AppError>;

    /// Count stored rates
    async fn count_rates(&self) -> Result<i64, AppError>;
}

/// Quoting service trait
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Produce one quote per rate band matching the shipment's chargeable weight
    async fn calculate_quotes(
        &self,
        starting_country: &str,
        destination_country: &str,
        boxes: &[ShipmentBox],
    ) -> Result<Vec<Quote>, AppError>;
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
