//! Standard rate tables and catalog seeding

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shipquote_core::{
    models::{NewRate, NewRateBand},
    traits::RateCatalog,
    AppResult,
};
use tracing::{info, instrument};

fn rate(
    starting_country: &str,
    shipping_channel: &str,
    days: (i32, i32),
    bands: &[(Decimal, Decimal, Decimal)],
) -> NewRate {
    NewRate {
        starting_country: starting_country.to_string(),
        destination_country: "USA".to_string(),
        shipping_channel: shipping_channel.to_string(),
        shipping_time_range_min_days: days.0,
        shipping_time_range_max_days: days.1,
        bands: bands
            .iter()
            .map(|&(min, max, per_kg)| NewRateBand::new(min, max, per_kg))
            .collect(),
    }
}

/// Built-in rate tables for the supported routes into the USA
///
/// The legacy data carried a second China -> USA air rate. It is replaced
/// here by a Vietnam -> USA air table (15-20 days), so China yields one air
/// quote instead of two and Vietnam has an air route of its own.
pub fn standard_rate_definitions() -> Vec<NewRate> {
    vec![
        rate(
            "China",
            "air",
            (15, 20),
            &[
                (dec!(0), dec!(20), dec!(5.00)),
                (dec!(20), dec!(40), dec!(4.50)),
                (dec!(40), dec!(100), dec!(4.00)),
                (dec!(100), dec!(10000), dec!(3.50)),
            ],
        ),
        rate(
            "China",
            "ocean",
            (45, 50),
            &[(dec!(100), dec!(10000), dec!(1.00))],
        ),
        rate(
            "India",
            "air",
            (10, 15),
            &[
                (dec!(0), dec!(10), dec!(10.00)),
                (dec!(10), dec!(20), dec!(9.50)),
                (dec!(20), dec!(30), dec!(9.00)),
                (dec!(30), dec!(40), dec!(8.50)),
                (dec!(40), dec!(50), dec!(8.00)),
                (dec!(50), dec!(10000), dec!(6.00)),
            ],
        ),
        rate(
            "India",
            "ocean",
            (40, 50),
            &[(dec!(100), dec!(10000), dec!(1.50))],
        ),
        rate(
            "Vietnam",
            "air",
            (15, 20),
            &[
                (dec!(0), dec!(100), dec!(5.00)),
                (dec!(100), dec!(200), dec!(4.50)),
                (dec!(200), dec!(500), dec!(4.00)),
                (dec!(500), dec!(10000), dec!(3.50)),
            ],
        ),
    ]
}

/// Write the standard tables into `catalog`
///
/// Each rate goes through `create_rate_with_bands`, so a failure leaves
/// earlier rates in place and never a partial one. Returns the number of
/// rates created.
#[instrument(skip(catalog))]
pub async fn seed_catalog(catalog: &dyn RateCatalog) -> AppResult<usize> {
    let definitions = standard_rate_definitions();
    let mut created = 0;

    for definition in &definitions {
        let rate = catalog.create_rate_with_bands(definition).await?;
        info!(
            id = rate.id,
            origin = %rate.starting_country,
            channel = %rate.shipping_channel,
            bands = rate.bands.len(),
            "Seeded rate"
        );
        created += 1;
    }

    info!("Seeded {} rates", created);
    Ok(created)
}
