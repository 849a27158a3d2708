//! Quote calculation service
//!
//! Turns a shipment into one quote per catalog band that covers its
//! chargeable weight.

use async_trait::async_trait;
use shipquote_core::{
    models::{round_money, BandMatch, Quote, QuotePriceBreakdown, ShipmentBox},
    traits::{QuoteService, RateCatalog},
    AppError, AppResult,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::surcharge::{SurchargeAssessment, SurchargePolicy};
use crate::weight::chargeable_weight;

/// Quote calculation service
///
/// Holds no mutable state: every call reads the catalog once and
/// computes the result from its inputs.
pub struct QuoteCalculationService<C: RateCatalog + ?Sized> {
    catalog: Arc<C>,
    policy: SurchargePolicy,
}

impl<C: RateCatalog + ?Sized> QuoteCalculationService<C> {
    /// Create a service using the standard surcharge rules
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_policy(catalog, SurchargePolicy::standard())
    }

    /// Create a service with a custom surcharge rule table
    pub fn with_policy(catalog: Arc<C>, policy: SurchargePolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> &SurchargePolicy {
        &self.policy
    }

    fn build_quote(
        weight_kg: Decimal,
        band: BandMatch,
        fees: &SurchargeAssessment,
    ) -> AppResult<Quote> {
        let shipping_cost = weight_kg
            .checked_mul(band.per_kg_rate)
            .map(round_money)
            .ok_or_else(|| {
                AppError::InvalidInput("Shipping cost is too large to price".to_string())
            })?;

        let cost_breakdown = QuotePriceBreakdown {
            shipping_cost,
            service_fee: fees.service_fee,
            oversized_fee: fees.oversized_fee,
            overweight_fee: fees.overweight_fee,
        };

        // total_cost is derived on read, so it must be representable too
        if cost_breakdown.checked_total().is_none() {
            return Err(AppError::InvalidInput(
                "Total cost is too large to price".to_string(),
            ));
        }

        Ok(Quote {
            shipping_channel: band.shipping_channel,
            cost_breakdown,
            shipping_time_range: band.shipping_time_range,
        })
    }
}

#[async_trait]
impl<C: RateCatalog + ?Sized> QuoteService for QuoteCalculationService<C> {
    #[instrument(skip(self, boxes), fields(boxes = boxes.len()))]
    async fn calculate_quotes(
        &self,
        starting_country: &str,
        destination_country: &str,
        boxes: &[ShipmentBox],
    ) -> AppResult<Vec<Quote>> {
        let weight_kg = chargeable_weight(boxes)?;
        debug!("Chargeable weight: {} kg", weight_kg);

        let bands = self
            .catalog
            .lookup_bands(starting_country, destination_country, weight_kg)
            .await?;

        if bands.is_empty() {
            debug!(
                "No rate band covers {} kg on {} -> {}",
                weight_kg, starting_country, destination_country
            );
            return Ok(Vec::new());
        }

        let fees = self.policy.assess(starting_country, boxes);
        debug!(
            service_fee = %fees.service_fee,
            oversized_fee = %fees.oversized_fee,
            overweight_fee = %fees.overweight_fee,
            "Surcharges assessed"
        );

        bands
            .into_iter()
            .map(|band| Self::build_quote(weight_kg, band, &fees))
            .collect()
    }
}
