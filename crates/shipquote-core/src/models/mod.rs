//! Domain models for ShipQuote
//!
//! This module contains all the core domain models used throughout the application.

pub mod quote;
pub mod rate;
pub mod shipment;

pub use quote::{round_money, Quote, QuotePriceBreakdown, ShippingTimeRange, MONEY_SCALE};
pub use rate::{BandMatch, NewRate, NewRateBand, Rate, RateBand};
pub use shipment::ShipmentBox;
