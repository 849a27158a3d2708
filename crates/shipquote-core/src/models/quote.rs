//! Quote model
//!
//! Quotes are computed per request and never persisted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places kept on every monetary amount
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary amount to cents, ties to the nearest even cent
#[inline]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Transit time range in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTimeRange {
    pub min_days: i32,
    pub max_days: i32,
}

/// Cost components of a quote, each already rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotePriceBreakdown {
    /// Chargeable weight times the band's per kg rate
    pub shipping_cost: Decimal,

    /// Flat per-shipment fee for the origin country
    pub service_fee: Decimal,

    /// Sum of per-box oversized surcharges
    pub oversized_fee: Decimal,

    /// Sum of per-box overweight surcharges
    pub overweight_fee: Decimal,
}

impl QuotePriceBreakdown {
    /// Sum of the four components
    ///
    /// Components are rounded on construction, so the sum is not rounded again.
    pub fn total(&self) -> Decimal {
        self.shipping_cost + self.service_fee + self.oversized_fee + self.overweight_fee
    }

    /// Sum of the four components, `None` when it does not fit in a `Decimal`
    pub fn checked_total(&self) -> Option<Decimal> {
        self.shipping_cost
            .checked_add(self.service_fee)?
            .checked_add(self.oversized_fee)?
            .checked_add(self.overweight_fee)
    }
}

/// Shipping quote for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub shipping_channel: String,
    pub cost_breakdown: QuotePriceBreakdown,
    pub shipping_time_range: ShippingTimeRange,
}

impl Quote {
    /// Total cost, derived on read from the breakdown
    #[inline]
    pub fn total_cost(&self) -> Decimal {
        self.cost_breakdown.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(3036.19999999)), dec!(3036.20));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        assert_eq!(round_money(dec!(1.125)), dec!(1.12));
        assert_eq!(round_money(dec!(2.665)), dec!(2.66));
        assert_eq!(round_money(dec!(2.674)), dec!(2.67));
        assert_eq!(round_money(dec!(300)), dec!(300));
    }

    #[test]
    fn test_total_cost_is_sum_of_breakdown() {
        let quote = Quote {
            shipping_channel: "air".to_string(),
            cost_breakdown: QuotePriceBreakdown {
                shipping_cost: dec!(7000.00),
                service_fee: dec!(300),
                oversized_fee: dec!(100),
                overweight_fee: dec!(0),
            },
            shipping_time_range: ShippingTimeRange {
                min_days: 15,
                max_days: 20,
            },
        };

        assert_eq!(quote.total_cost(), dec!(7400.00));
    }

    #[test]
    fn test_default_breakdown_is_zero() {
        assert_eq!(QuotePriceBreakdown::default().total(), Decimal::ZERO);
    }

    #[test]
    fn test_checked_total() {
        let breakdown = QuotePriceBreakdown {
            shipping_cost: dec!(3036.20),
            service_fee: dec!(300),
            oversized_fee: dec!(200),
            overweight_fee: dec!(0),
        };
        assert_eq!(breakdown.checked_total(), Some(breakdown.total()));

        let huge = QuotePriceBreakdown {
            shipping_cost: Decimal::MAX,
            service_fee: dec!(300),
            ..Default::default()
        };
        assert_eq!(huge.checked_total(), None);
    }
}
