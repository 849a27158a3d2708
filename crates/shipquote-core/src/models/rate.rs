//! Rate model
//!
//! A rate is a priced shipping offer for an origin/destination/channel
//! triple. Its price depends on the chargeable weight through a set of
//! weight bands, each carrying a per-kilogram rate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::ShippingTimeRange;

/// Rate entity with its weight bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rate {
    /// Unique identifier
    pub id: i32,

    /// Origin country (e.g., "China")
    pub starting_country: String,

    /// Destination country (e.g., "USA")
    pub destination_country: String,

    /// Shipping channel (e.g., "air", "ocean")
    pub shipping_channel: String,

    /// Fastest expected transit time in days
    pub shipping_time_range_min_days: i32,

    /// Slowest expected transit time in days
    pub shipping_time_range_max_days: i32,

    /// Weight bands owned by this rate
    pub bands: Vec<RateBand>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Rate {
    /// Transit time range of this rate
    pub fn shipping_time_range(&self) -> ShippingTimeRange {
        ShippingTimeRange {
            min_days: self.shipping_time_range_min_days,
            max_days: self.shipping_time_range_max_days,
        }
    }

    /// Whether this rate serves the given route
    pub fn serves(&self, starting_country: &str, destination_country: &str) -> bool {
        self.starting_country == starting_country
            && self.destination_country == destination_country
    }

    /// Every band of this rate that contains `weight_kg`
    pub fn matching_bands(&self, weight_kg: Decimal) -> impl Iterator<Item = &RateBand> {
        self.bands.iter().filter(move |band| band.contains(weight_kg))
    }
}

/// Weight band of a rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    /// Unique identifier
    pub id: i32,

    /// Lower bound of the band (inclusive)
    pub min_weight_kg: Decimal,

    /// Upper bound of the band (inclusive)
    pub max_weight_kg: Decimal,

    /// Price per chargeable kilogram
    pub per_kg_rate: Decimal,
}

impl RateBand {
    /// Check whether a weight falls in this band, both bounds inclusive
    #[inline]
    pub fn contains(&self, weight_kg: Decimal) -> bool {
        self.min_weight_kg <= weight_kg && weight_kg <= self.max_weight_kg
    }
}

/// Rate definition used by the catalog write path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRate {
    pub starting_country: String,
    pub destination_country: String,
    pub shipping_channel: String,
    pub shipping_time_range_min_days: i32,
    pub shipping_time_range_max_days: i32,
    pub bands: Vec<NewRateBand>,
}

/// Weight band definition used by the catalog write path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRateBand {
    pub min_weight_kg: Decimal,
    pub max_weight_kg: Decimal,
    pub per_kg_rate: Decimal,
}

impl NewRateBand {
    pub fn new(min_weight_kg: Decimal, max_weight_kg: Decimal, per_kg_rate: Decimal) -> Self {
        Self {
            min_weight_kg,
            max_weight_kg,
            per_kg_rate,
        }
    }
}

impl NewRate {
    /// Validate the definition before it reaches storage
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_country.trim().is_empty() {
            return Err("Starting country cannot be empty".to_string());
        }

        if self.destination_country.trim().is_empty() {
            return Err("Destination country cannot be empty".to_string());
        }

        if self.shipping_channel.trim().is_empty() {
            return Err("Shipping channel cannot be empty".to_string());
        }

        if self.shipping_time_range_min_days < 0 {
            return Err("Minimum shipping days cannot be negative".to_string());
        }

        if self.shipping_time_range_min_days > self.shipping_time_range_max_days {
            return Err(format!(
                "Minimum shipping days ({}) exceeds maximum ({})",
                self.shipping_time_range_min_days, self.shipping_time_range_max_days
            ));
        }

        for (index, band) in self.bands.iter().enumerate() {
            if band.min_weight_kg < Decimal::ZERO {
                return Err(format!("Band {}: minimum weight cannot be negative", index));
            }

            if band.min_weight_kg > band.max_weight_kg {
                return Err(format!(
                    "Band {}: minimum weight {} exceeds maximum {}",
                    index, band.min_weight_kg, band.max_weight_kg
                ));
            }

            if band.per_kg_rate < Decimal::ZERO {
                return Err(format!("Band {}: per kg rate cannot be negative", index));
            }
        }

        Ok(())
    }
}

/// A band matched by a catalog lookup, joined with its parent rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandMatch {
    pub rate_id: i32,
    pub band_id: i32,
    pub shipping_channel: String,
    pub per_kg_rate: Decimal,
    pub shipping_time_range: ShippingTimeRange,
}

impl BandMatch {
    pub fn from_rate_band(rate: &Rate, band: &RateBand) -> Self {
        Self {
            rate_id: rate.id,
            band_id: band.id,
            shipping_channel: rate.shipping_channel.clone(),
            per_kg_rate: band.per_kg_rate,
            shipping_time_range: rate.shipping_time_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn band(min: Decimal, max: Decimal, rate: Decimal) -> RateBand {
        RateBand {
            id: 1,
            min_weight_kg: min,
            max_weight_kg: max,
            per_kg_rate: rate,
        }
    }

    fn china_air() -> NewRate {
        NewRate {
            starting_country: "China".to_string(),
            destination_country: "USA".to_string(),
            shipping_channel: "air".to_string(),
            shipping_time_range_min_days: 15,
            shipping_time_range_max_days: 20,
            bands: vec![
                NewRateBand::new(dec!(0), dec!(20), dec!(5.00)),
                NewRateBand::new(dec!(20), dec!(40), dec!(4.50)),
            ],
        }
    }

    #[test]
    fn test_band_contains_is_inclusive() {
        let b = band(dec!(20), dec!(40), dec!(4.50));
        assert!(b.contains(dec!(20)));
        assert!(b.contains(dec!(40)));
        assert!(b.contains(dec!(33.3)));
        assert!(!b.contains(dec!(19.99)));
        assert!(!b.contains(dec!(40.01)));
    }

    #[test]
    fn test_shared_boundary_matches_both_bands() {
        let rate = Rate {
            id: 1,
            starting_country: "China".to_string(),
            destination_country: "USA".to_string(),
            shipping_channel: "air".to_string(),
            shipping_time_range_min_days: 15,
            shipping_time_range_max_days: 20,
            bands: vec![
                band(dec!(0), dec!(20), dec!(5.00)),
                band(dec!(20), dec!(40), dec!(4.50)),
            ],
            created_at: Utc::now(),
        };

        assert_eq!(rate.matching_bands(dec!(20)).count(), 2);
        assert_eq!(rate.matching_bands(dec!(10)).count(), 1);
        assert_eq!(rate.matching_bands(dec!(50)).count(), 0);
        assert!(rate.serves("China", "USA"));
        assert!(!rate.serves("USA", "China"));
    }

    #[test]
    fn test_validate_accepts_well_formed_rate() {
        assert!(china_air().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_day_range() {
        let mut rate = china_air();
        rate.shipping_time_range_min_days = 30;
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let mut rate = china_air();
        rate.bands.push(NewRateBand::new(dec!(50), dec!(40), dec!(1)));
        let err = rate.validate().unwrap_err();
        assert!(err.starts_with("Band 2"));
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut rate = china_air();
        rate.bands[0].per_kg_rate = dec!(-1);
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_channel() {
        let mut rate = china_air();
        rate.shipping_channel = "  ".to_string();
        assert!(rate.validate().is_err());
    }
}
