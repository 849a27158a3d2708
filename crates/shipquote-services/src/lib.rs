//! Business logic services for ShipQuote
//!
//! This crate contains the quote calculation engine and the routines that
//! load rate tables into a catalog.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (the catalog behind an `Arc`)
//! - Calculation is stateless, so services are shared freely across workers
//! - All operations are instrumented with tracing
//! - Catalog failures propagate as AppError
//!
//! # Services
//!
//! - `QuoteCalculationService` - Chargeable weight, band lookup and fee assessment
//! - `SurchargePolicy` - Per-origin surcharge rule table
//! - `seed` - Standard rate tables and catalog seeding

pub mod quoting;
pub mod seed;
pub mod surcharge;
pub mod weight;

pub use quoting::QuoteCalculationService;
pub use seed::{seed_catalog, standard_rate_definitions};
pub use surcharge::{CountryRule, SurchargeAssessment, SurchargePolicy, Threshold};

/// Business logic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Cubic centimeters per volumetric kilogram
    pub const VOLUMETRIC_DIVISOR: Decimal = dec!(6000);

    /// Default overweight limit per box in kilograms (exclusive)
    pub const DEFAULT_OVERWEIGHT_LIMIT_KG: Decimal = dec!(30);

    /// Default oversized limit on the longest side in centimeters (exclusive)
    pub const DEFAULT_OVERSIZED_LIMIT_CM: Decimal = dec!(120);

    /// Surcharge per overweight box entry
    pub const OVERWEIGHT_FEE: Decimal = dec!(80);

    /// Surcharge per oversized box entry
    pub const OVERSIZED_FEE: Decimal = dec!(100);
}
