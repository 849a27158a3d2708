//! Quote DTOs
//!
//! Request and response types for the quote endpoint. Monetary amounts are
//! rendered as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shipquote_core::models::{Quote, QuotePriceBreakdown, ShipmentBox, ShippingTimeRange};
use validator::{Validate, ValidationError};

/// One group of identical boxes in a quote request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BoxRequest {
    /// Number of identical boxes
    #[validate(range(min = 1, message = "Box count must be at least 1"))]
    pub count: u32,

    /// Weight of one box in kilograms
    #[validate(custom(function = "non_negative"))]
    pub weight_kg: Decimal,

    /// Length in centimeters
    #[validate(custom(function = "non_negative"))]
    pub length: Decimal,

    /// Width in centimeters
    #[validate(custom(function = "non_negative"))]
    pub width: Decimal,

    /// Height in centimeters
    #[validate(custom(function = "non_negative"))]
    pub height: Decimal,
}

impl From<&BoxRequest> for ShipmentBox {
    fn from(req: &BoxRequest) -> Self {
        Self::new(req.count, req.weight_kg, req.length, req.width, req.height)
    }
}

/// Quote request for a shipment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Origin country (e.g., "China")
    #[validate(length(min = 1, max = 100, message = "Starting country is required"))]
    pub starting_country: String,

    /// Destination country (e.g., "USA")
    #[validate(length(min = 1, max = 100, message = "Destination country is required"))]
    pub destination_country: String,

    /// Box groups making up the shipment, possibly empty
    #[validate(nested)]
    pub boxes: Vec<BoxRequest>,
}

impl QuoteRequest {
    /// Shipment boxes in the order they were sent
    pub fn shipment_boxes(&self) -> Vec<ShipmentBox> {
        self.boxes.iter().map(ShipmentBox::from).collect()
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Value cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Cost components of a quote
#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdownResponse {
    /// Chargeable weight times the band's per-kg rate
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,

    /// Flat per-shipment fee
    #[serde(with = "rust_decimal::serde::float")]
    pub service_fee: Decimal,

    /// Oversized box surcharge
    #[serde(with = "rust_decimal::serde::float")]
    pub oversized_fee: Decimal,

    /// Overweight box surcharge
    #[serde(with = "rust_decimal::serde::float")]
    pub overweight_fee: Decimal,
}

impl From<QuotePriceBreakdown> for CostBreakdownResponse {
    fn from(b: QuotePriceBreakdown) -> Self {
        Self {
            shipping_cost: b.shipping_cost,
            service_fee: b.service_fee,
            oversized_fee: b.oversized_fee,
            overweight_fee: b.overweight_fee,
        }
    }
}

/// A single priced shipping option
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    /// Shipping channel (e.g., "air")
    pub shipping_channel: String,

    /// Sum of every cost component
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,

    /// Cost components
    pub cost_breakdown: CostBreakdownResponse,

    /// Expected transit time
    pub shipping_time_range: ShippingTimeRange,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            total_cost: quote.total_cost(),
            shipping_channel: quote.shipping_channel,
            cost_breakdown: quote.cost_breakdown.into(),
            shipping_time_range: quote.shipping_time_range,
        }
    }
}

/// Response body of the quote endpoint
#[derive(Debug, Clone, Serialize)]
pub struct QuotesResponse {
    /// One entry per matching rate band; empty when nothing matches
    pub quotes: Vec<QuoteResponse>,
}

impl From<Vec<Quote>> for QuotesResponse {
    fn from(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
        }
    }
}
