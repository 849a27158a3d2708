//! Per-origin surcharge rules
//!
//! Overweight and oversized fees are charged once per box entry that
//! exceeds its origin's threshold; the service fee is flat per shipment.
//! Every origin uses the default rule unless the table holds an override,
//! so supporting a new country is a `with_rule` entry.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shipquote_core::models::{round_money, ShipmentBox};
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_OVERSIZED_LIMIT_CM, DEFAULT_OVERWEIGHT_LIMIT_KG, OVERSIZED_FEE, OVERWEIGHT_FEE,
};

/// Limit a measured value is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Triggered when the value is greater than or equal to the limit
    AtLeast(Decimal),
    /// Triggered when the value is strictly greater than the limit
    Above(Decimal),
}

impl Threshold {
    #[inline]
    pub fn is_exceeded_by(&self, value: Decimal) -> bool {
        match *self {
            Threshold::AtLeast(limit) => value >= limit,
            Threshold::Above(limit) => value > limit,
        }
    }
}

/// Surcharge parameters for one origin country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRule {
    /// Applied to a single box's `weight_kg`
    pub overweight: Threshold,
    /// Applied to a single box's longest dimension
    pub oversized: Threshold,
    pub overweight_fee: Decimal,
    pub oversized_fee: Decimal,
    /// Flat fee per shipment
    pub service_fee: Decimal,
}

impl Default for CountryRule {
    /// Boxes over 30 kg or with a side over 120 cm are surcharged; no service fee.
    fn default() -> Self {
        Self {
            overweight: Threshold::Above(DEFAULT_OVERWEIGHT_LIMIT_KG),
            oversized: Threshold::Above(DEFAULT_OVERSIZED_LIMIT_CM),
            overweight_fee: OVERWEIGHT_FEE,
            oversized_fee: OVERSIZED_FEE,
            service_fee: Decimal::ZERO,
        }
    }
}

impl CountryRule {
    pub fn is_overweight(&self, b: &ShipmentBox) -> bool {
        self.overweight.is_exceeded_by(b.weight_kg)
    }

    pub fn is_oversized(&self, b: &ShipmentBox) -> bool {
        self.oversized.is_exceeded_by(b.longest_dimension())
    }
}

/// Fees assessed on a shipment, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurchargeAssessment {
    pub service_fee: Decimal,
    pub oversized_fee: Decimal,
    pub overweight_fee: Decimal,
}

/// Rule table keyed by origin country
#[derive(Debug, Clone)]
pub struct SurchargePolicy {
    default_rule: CountryRule,
    overrides: HashMap<String, CountryRule>,
}

impl Default for SurchargePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl SurchargePolicy {
    /// Policy with only the default rule
    pub fn new(default_rule: CountryRule) -> Self {
        Self {
            default_rule,
            overrides: HashMap::new(),
        }
    }

    /// Production rule table
    ///
    /// | origin  | change from default            |
    /// |---------|--------------------------------|
    /// | China   | service fee 300                |
    /// | India   | overweight at 15 kg or more    |
    /// | Vietnam | oversized above 70 cm          |
    pub fn standard() -> Self {
        let base = CountryRule::default();

        Self::new(base)
            .with_rule(
                "China",
                CountryRule {
                    service_fee: dec!(300),
                    ..base
                },
            )
            .with_rule(
                "India",
                CountryRule {
                    overweight: Threshold::AtLeast(dec!(15)),
                    ..base
                },
            )
            .with_rule(
                "Vietnam",
                CountryRule {
                    oversized: Threshold::Above(dec!(70)),
                    ..base
                },
            )
    }

    /// Add or replace the rule for an origin country
    pub fn with_rule(mut self, country: impl Into<String>, rule: CountryRule) -> Self {
        self.overrides.insert(country.into(), rule);
        self
    }

    /// Rule that applies to shipments from `starting_country`
    pub fn rule_for(&self, starting_country: &str) -> &CountryRule {
        self.overrides
            .get(starting_country)
            .unwrap_or(&self.default_rule)
    }

    /// Assess every surcharge for a shipment
    pub fn assess(&self, starting_country: &str, boxes: &[ShipmentBox]) -> SurchargeAssessment {
        let rule = self.rule_for(starting_country);

        let overweight_boxes = boxes.iter().filter(|b| rule.is_overweight(b)).count();
        let oversized_boxes = boxes.iter().filter(|b| rule.is_oversized(b)).count();

        SurchargeAssessment {
            service_fee: round_money(rule.service_fee),
            oversized_fee: round_money(rule.oversized_fee * Decimal::from(oversized_boxes)),
            overweight_fee: round_money(rule.overweight_fee * Decimal::from(overweight_boxes)),
        }
    }
}
