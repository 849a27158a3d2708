//! Rate DTOs
//!
//! Request and response types for rate catalog administration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shipquote_core::models::{NewRate, NewRateBand, Rate, RateBand, ShippingTimeRange};
use validator::Validate;

/// Weight band in a rate creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateBandRequest {
    /// Lower bound in kilograms (inclusive)
    pub min_weight_kg: Decimal,
    /// Upper bound in kilograms (inclusive)
    pub max_weight_kg: Decimal,
    /// Price per chargeable kilogram
    pub per_kg_rate: Decimal,
}

/// Rate creation request
///
/// Band bounds and transit days are checked by the catalog write path,
/// which rejects the whole rate on any bad band.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateCreateRequest {
    /// Origin country
    #[validate(length(min = 1, max = 100, message = "Starting country is required"))]
    pub starting_country: String,

    /// Destination country
    #[validate(length(min = 1, max = 100, message = "Destination country is required"))]
    pub destination_country: String,

    /// Shipping channel (e.g., "air", "ocean")
    #[validate(length(min = 1, max = 50, message = "Shipping channel is required"))]
    pub shipping_channel: String,

    /// Expected transit time
    pub shipping_time_range: ShippingTimeRange,

    /// Weight bands owned by the rate
    #[validate(length(min = 1, message = "At least one weight band is required"))]
    pub bands: Vec<RateBandRequest>,
}

impl RateCreateRequest {
    /// Convert to the catalog write model
    pub fn to_new_rate(&self) -> NewRate {
        NewRate {
            starting_country: self.starting_country.clone(),
            destination_country: self.destination_country.clone(),
            shipping_channel: self.shipping_channel.clone(),
            shipping_time_range_min_days: self.shipping_time_range.min_days,
            shipping_time_range_max_days: self.shipping_time_range.max_days,
            bands: self
                .bands
                .iter()
                .map(|b| NewRateBand::new(b.min_weight_kg, b.max_weight_kg, b.per_kg_rate))
                .collect(),
        }
    }
}

/// Weight band in a rate response
#[derive(Debug, Clone, Serialize)]
pub struct RateBandResponse {
    /// Band ID
    pub id: i32,
    /// Lower bound in kilograms
    pub min_weight_kg: Decimal,
    /// Upper bound in kilograms
    pub max_weight_kg: Decimal,
    /// Price per chargeable kilogram
    pub per_kg_rate: Decimal,
}

impl From<RateBand> for RateBandResponse {
    fn from(band: RateBand) -> Self {
        Self {
            id: band.id,
            min_weight_kg: band.min_weight_kg,
            max_weight_kg: band.max_weight_kg,
            per_kg_rate: band.per_kg_rate,
        }
    }
}

/// Rate response with its bands
#[derive(Debug, Clone, Serialize)]
pub struct RateResponse {
    /// Rate ID
    pub id: i32,
    /// Origin country
    pub starting_country: String,
    /// Destination country
    pub destination_country: String,
    /// Shipping channel
    pub shipping_channel: String,
    /// Expected transit time
    pub shipping_time_range: ShippingTimeRange,
    /// Weight bands
    pub bands: Vec<RateBandResponse>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Rate> for RateResponse {
    fn from(rate: Rate) -> Self {
        Self {
            shipping_time_range: rate.shipping_time_range(),
            id: rate.id,
            starting_country: rate.starting_country,
            destination_country: rate.destination_country,
            shipping_channel: rate.shipping_channel,
            bands: rate.bands.into_iter().map(RateBandResponse::from).collect(),
            created_at: rate.created_at,
        }
    }
}
