//! In-memory rate catalog
//!
//! Keeps rates in process memory behind a single lock. Used by tests and
//! by the `memory` catalog backend; contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shipquote_core::{
    models::{BandMatch, NewRate, Rate, RateBand},
    traits::RateCatalog,
    AppError, AppResult,
};
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct CatalogState {
    rates: Vec<Rate>,
    next_rate_id: i32,
    next_band_id: i32,
}

/// Process-local implementation of RateCatalog
#[derive(Debug, Default)]
pub struct InMemoryRateCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryRateCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateCatalog for InMemoryRateCatalog {
    #[instrument(skip(self))]
    async fn lookup_bands(
        &self,
        starting_country: &str,
        destination_country: &str,
        weight_kg: Decimal,
    ) -> AppResult<Vec<BandMatch>> {
        let state = self.state.read();

        let hits: Vec<BandMatch> = state
            .rates
            .iter()
            .filter(|rate| rate.serves(starting_country, destination_country))
            .flat_map(|rate| {
                rate.matching_bands(weight_kg)
                    .map(move |band| BandMatch::from_rate_band(rate, band))
            })
            .collect();

        debug!("Found {} matching bands", hits.len());
        Ok(hits)
    }

    #[instrument(skip(self, rate), fields(channel = %rate.shipping_channel))]
    async fn create_rate_with_bands(&self, rate: &NewRate) -> AppResult<Rate> {
        rate.validate().map_err(AppError::InvalidRate)?;

        // The whole rate becomes visible in one write-locked push
        let mut state = self.state.write();

        state.next_rate_id += 1;
        let id = state.next_rate_id;

        let mut bands = Vec::with_capacity(rate.bands.len());
        for band in &rate.bands {
            state.next_band_id += 1;
            bands.push(RateBand {
                id: state.next_band_id,
                min_weight_kg: band.min_weight_kg,
                max_weight_kg: band.max_weight_kg,
                per_kg_rate: band.per_kg_rate,
            });
        }

        let created = Rate {
            id,
            starting_country: rate.starting_country.clone(),
            destination_country: rate.destination_country.clone(),
            shipping_channel: rate.shipping_channel.clone(),
            shipping_time_range_min_days: rate.shipping_time_range_min_days,
            shipping_time_range_max_days: rate.shipping_time_range_max_days,
            bands,
            created_at: Utc::now(),
        };
        state.rates.push(created.clone());

        info!(id, bands = created.bands.len(), "Rate created");
        Ok(created)
    }

    async fn find_rate(&self, id: i32) -> AppResult<Option<Rate>> {
        Ok(self.state.read().rates.iter().find(|r| r.id == id).cloned())
    }

    async fn list_rates(&self, limit: i64, offset: i64) -> AppResult<Vec<Rate>> {
        let limit = usize::try_from(limit)
            .map_err(|_| AppError::InvalidInput(format!("Invalid limit: {}", limit)))?;
        let offset = usize::try_from(offset)
            .map_err(|_| AppError::InvalidInput(format!("Invalid offset: {}", offset)))?;

        Ok(self
            .state
            .read()
            .rates
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_rates(&self) -> AppResult<i64> {
        Ok(self.state.read().rates.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shipquote_core::models::NewRateBand;

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
                NewRateBand::new(dec!(40), dec!(100), dec!(4.00)),
                NewRateBand::new(dec!(100), dec!(10000), dec!(3.50)),
            ],
        }
    }

    fn china_ocean() -> NewRate {
        NewRate {
            starting_country: "China".to_string(),
            destination_country: "USA".to_string(),
            shipping_channel: "ocean".to_string(),
            shipping_time_range_min_days: 45,
            shipping_time_range_max_days: 50,
            bands: vec![NewRateBand::new(dec!(100), dec!(10000), dec!(1.00))],
        }
    }

    #[tokio::test]
    async fn test_create_rate_with_bands() {
        let catalog = InMemoryRateCatalog::new();

        let air = catalog.create_rate_with_bands(&china_air()).await.unwrap();
        let ocean = catalog.create_rate_with_bands(&china_ocean()).await.unwrap();

        assert_eq!(air.id, 1);
        assert_eq!(ocean.id, 2);
        assert_eq!(air.bands.len(), 4);
        assert_eq!(ocean.bands.len(), 1);
        assert_eq!(ocean.bands[0].id, 5);

        let stored = catalog.find_rate(air.id).await.unwrap().unwrap();
        let bounds: Vec<(Decimal, Decimal, Decimal)> = stored
            .bands
            .iter()
            .map(|b| (b.min_weight_kg, b.max_weight_kg, b.per_kg_rate))
            .collect();
        assert_eq!(
            bounds,
            vec![
                (dec!(0), dec!(20), dec!(5.00)),
                (dec!(20), dec!(40), dec!(4.50)),
                (dec!(40), dec!(100), dec!(4.00)),
                (dec!(100), dec!(10000), dec!(3.50)),
            ]
        );
        assert_eq!(catalog.count_rates().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalid_rate_leaves_catalog_untouched() {
        let catalog = InMemoryRateCatalog::new();
        let mut rate = china_air();
        rate.bands.push(NewRateBand::new(dec!(10), dec!(5), dec!(1)));

        let result = catalog.create_rate_with_bands(&rate).await;
        assert!(matches!(result, Err(AppError::InvalidRate(_))));
        assert_eq!(catalog.count_rates().await.unwrap(), 0);
        assert!(catalog.lookup_bands("China", "USA", dec!(10)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_is_inclusive_on_both_bounds() {
        let catalog = InMemoryRateCatalog::new();
        catalog.create_rate_with_bands(&china_ocean()).await.unwrap();

        assert_eq!(catalog.lookup_bands("China", "USA", dec!(100)).await.unwrap().len(), 1);
        assert_eq!(catalog.lookup_bands("China", "USA", dec!(10000)).await.unwrap().len(), 1);
        assert!(catalog.lookup_bands("China", "USA", dec!(99.99)).await.unwrap().is_empty());
        assert!(catalog.lookup_bands("China", "USA", dec!(10000.01)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_filters_route_and_keeps_order() {
        let catalog = InMemoryRateCatalog::new();
        catalog.create_rate_with_bands(&china_air()).await.unwrap();
        catalog.create_rate_with_bands(&china_ocean()).await.unwrap();

        let hits = catalog.lookup_bands("China", "USA", dec!(2000)).await.unwrap();
        let channels: Vec<&str> = hits.iter().map(|h| h.shipping_channel.as_str()).collect();
        assert_eq!(channels, vec!["air", "ocean"]);
        assert_eq!(hits[0].per_kg_rate, dec!(3.50));
        assert_eq!(hits[1].shipping_time_range.min_days, 45);

        assert!(catalog.lookup_bands("India", "USA", dec!(2000)).await.unwrap().is_empty());
        assert!(catalog.lookup_bands("USA", "China", dec!(2000)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rates_paginates() {
        let catalog = InMemoryRateCatalog::new();
        catalog.create_rate_with_bands(&china_air()).await.unwrap();
        catalog.create_rate_with_bands(&china_ocean()).await.unwrap();

        let page = catalog.list_rates(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].shipping_channel, "ocean");

        assert!(catalog.list_rates(10, 5).await.unwrap().is_empty());
        assert!(catalog.list_rates(-1, 0).await.is_err());
    }
}
