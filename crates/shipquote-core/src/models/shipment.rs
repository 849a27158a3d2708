//! Shipment box model
//!
//! A line of identical boxes in a quote request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A group of identical boxes
///
/// Weights are in kilograms, dimensions in centimeters. Surcharges are
/// assessed per entry, not per unit in `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentBox {
    /// Number of identical boxes in this entry
    pub count: u32,

    /// Actual weight of a single box
    pub weight_kg: Decimal,

    /// Length of a single box
    pub length: Decimal,

    /// Width of a single box
    pub width: Decimal,

    /// Height of a single box
    pub height: Decimal,
}

impl ShipmentBox {
    pub fn new(
        count: u32,
        weight_kg: Decimal,
        length: Decimal,
        width: Decimal,
        height: Decimal,
    ) -> Self {
        Self {
            count,
            weight_kg,
            length,
            width,
            height,
        }
    }

    /// Volume of a single box in cubic centimeters
    ///
    /// `None` when the product does not fit in a `Decimal`.
    #[inline]
    pub fn volume(&self) -> Option<Decimal> {
        self.length
            .checked_mul(self.width)?
            .checked_mul(self.height)
    }

    /// Largest of the three dimensions
    #[inline]
    pub fn longest_dimension(&self) -> Decimal {
        self.length.max(self.width).max(self.height)
    }

    /// Combined actual weight of every box in this entry
    #[inline]
    pub fn total_weight(&self) -> Option<Decimal> {
        Decimal::from(self.count).checked_mul(self.weight_kg)
    }

    /// Combined volume of every box in this entry
    #[inline]
    pub fn total_volume(&self) -> Option<Decimal> {
        Decimal::from(self.count).checked_mul(self.volume()?)
    }
}
