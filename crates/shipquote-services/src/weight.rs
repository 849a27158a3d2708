//! Shipment weight computation
//!
//! Carriers bill the greater of the actual and the dimensional weight.
//! Every step is checked: a shipment whose totals do not fit in a
//! `Decimal` is rejected as invalid input.

use rust_decimal::Decimal;
use shipquote_core::{models::ShipmentBox, AppError, AppResult};

use crate::constants::VOLUMETRIC_DIVISOR;

fn overflow(what: &str) -> AppError {
    AppError::InvalidInput(format!("Shipment {} is too large to price", what))
}

fn checked_sum<I>(terms: I, what: &str) -> AppResult<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    terms.into_iter().try_fold(Decimal::ZERO, |acc, term| {
        term.and_then(|t| acc.checked_add(t))
            .ok_or_else(|| overflow(what))
    })
}

/// Sum of `count × weight_kg` over all boxes
pub fn gross_weight(boxes: &[ShipmentBox]) -> AppResult<Decimal> {
    checked_sum(boxes.iter().map(ShipmentBox::total_weight), "weight")
}

/// Sum of `count × volume / 6000` over all boxes
pub fn volumetric_weight(boxes: &[ShipmentBox]) -> AppResult<Decimal> {
    checked_sum(
        boxes
            .iter()
            .map(|b| b.total_volume().map(|v| v / VOLUMETRIC_DIVISOR)),
        "volume",
    )
}

/// Greater of gross and volumetric weight; zero for an empty shipment
pub fn chargeable_weight(boxes: &[ShipmentBox]) -> AppResult<Decimal> {
    Ok(gross_weight(boxes)?.max(volumetric_weight(boxes)?))
}
