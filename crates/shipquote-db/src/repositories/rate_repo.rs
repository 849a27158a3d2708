//! Rate catalog repository implementation
//!
//! Provides PostgreSQL-backed storage for rates and their weight bands,
//! with an inclusive range query for chargeable-weight lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shipquote_core::{
    models::{BandMatch, NewRate, Rate, RateBand, ShippingTimeRange},
    traits::RateCatalog,
    AppError, AppResult,
};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

/// PostgreSQL implementation of RateCatalog
pub struct PgRateCatalog {
    pool: PgPool,
}

impl PgRateCatalog {
    /// Create a new rate catalog
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the bands of several rates, grouped by rate ID
    async fn bands_for(&self, rate_ids: &[i32]) -> AppResult<HashMap<i32, Vec<RateBand>>> {
        let rows = sqlx::query_as::<sqlx::Postgres, RateBandRow>(
            r#"
            SELECT id, rate_id, min_weight_kg, max_weight_kg, per_kg_rate
            FROM rate_bands
            WHERE rate_id = ANY($1)
            ORDER BY rate_id, id
            "#,
        )
        .bind(rate_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error loading rate bands: {}", e);
            AppError::Database(format!("Failed to load rate bands: {}", e))
        })?;

        let mut grouped: HashMap<i32, Vec<RateBand>> = HashMap::new();
        for row in rows {
            grouped.entry(row.rate_id).or_default().push(row.into());
        }

        Ok(grouped)
    }
}

#[async_trait]
impl RateCatalog for PgRateCatalog {
    #[instrument(skip(self))]
    async fn lookup_bands(
        &self,
        starting_country: &str,
        destination_country: &str,
        weight_kg: Decimal,
    ) -> AppResult<Vec<BandMatch>> {
        debug!(
            "Looking up bands for {} -> {} at {} kg",
            starting_country, destination_country, weight_kg
        );

        let rows = sqlx::query_as::<sqlx::Postgres, BandMatchRow>(
            r#"
            SELECT
                r.id AS rate_id,
                b.id AS band_id,
                r.shipping_channel,
                b.per_kg_rate,
                r.shipping_time_range_min_days,
                r.shipping_time_range_max_days
            FROM rate_bands b
            INNER JOIN rates r ON r.id = b.rate_id
            WHERE r.starting_country = $1
                AND r.destination_country = $2
                AND b.min_weight_kg <= $3
                AND b.max_weight_kg >= $3
            ORDER BY r.id, b.id
            "#,
        )
        .bind(starting_country)
        .bind(destination_country)
        .bind(weight_kg)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error looking up bands for {} -> {}: {}",
                starting_country, destination_country, e
            );
            AppError::Database(format!("Failed to look up rate bands: {}", e))
        })?;

        debug!("Found {} matching bands", rows.len());

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(
        skip(self, rate),
        fields(
            origin = %rate.starting_country,
            destination = %rate.destination_country,
            channel = %rate.shipping_channel
        )
    )]
    async fn create_rate_with_bands(&self, rate: &NewRate) -> AppResult<Rate> {
        rate.validate().map_err(AppError::InvalidRate)?;

        debug!("Creating rate with {} bands", rate.bands.len());

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to start transaction: {}", e);
            AppError::Transaction(format!("Failed to start transaction: {}", e))
        })?;

        let row = sqlx::query_as::<sqlx::Postgres, RateRow>(
            r#"
            INSERT INTO rates (
                starting_country, destination_country, shipping_channel,
                shipping_time_range_min_days, shipping_time_range_max_days
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, starting_country, destination_country, shipping_channel,
                shipping_time_range_min_days, shipping_time_range_max_days,
                created_at
            "#,
        )
        .bind(&rate.starting_country)
        .bind(&rate.destination_country)
        .bind(&rate.shipping_channel)
        .bind(rate.shipping_time_range_min_days)
        .bind(rate.shipping_time_range_max_days)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating rate: {}", e);
            AppError::Database(format!("Failed to create rate: {}", e))
        })?;

        let mut bands = Vec::with_capacity(rate.bands.len());

        // Any failure below drops `tx`, which rolls back the rate insert too
        for band in &rate.bands {
            let band_row = sqlx::query_as::<sqlx::Postgres, RateBandRow>(
                r#"
                INSERT INTO rate_bands (rate_id, min_weight_kg, max_weight_kg, per_kg_rate)
                VALUES ($1, $2, $3, $4)
                RETURNING id, rate_id, min_weight_kg, max_weight_kg, per_kg_rate
                "#,
            )
            .bind(row.id)
            .bind(band.min_weight_kg)
            .bind(band.max_weight_kg)
            .bind(band.per_kg_rate)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Database error creating band for rate {}: {}", row.id, e);
                AppError::Database(format!("Failed to create rate band: {}", e))
            })?;

            bands.push(band_row.into());
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })?;

        info!(id = row.id, bands = bands.len(), "Rate created");

        Ok(row.into_rate(bands))
    }

    #[instrument(skip(self))]
    async fn find_rate(&self, id: i32) -> AppResult<Option<Rate>> {
        debug!("Finding rate by id: {}", id);

        let row = sqlx::query_as::<sqlx::Postgres, RateRow>(
            r#"
            SELECT
                id, starting_country, destination_country, shipping_channel,
                shipping_time_range_min_days, shipping_time_range_max_days,
                created_at
            FROM rates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding rate {}: {}", id, e);
            AppError::Database(format!("Failed to find rate: {}", e))
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut bands = self.bands_for(&[row.id]).await?;
        let bands = bands.remove(&row.id).unwrap_or_default();

        Ok(Some(row.into_rate(bands)))
    }

    #[instrument(skip(self))]
    async fn list_rates(&self, limit: i64, offset: i64) -> AppResult<Vec<Rate>> {
        debug!("Listing rates with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, RateRow>(
            r#"
            SELECT
                id, starting_country, destination_country, shipping_channel,
                shipping_time_range_min_days, shipping_time_range_max_days,
                created_at
            FROM rates
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing rates: {}", e);
            AppError::Database(format!("Failed to list rates: {}", e))
        })?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut bands = self.bands_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let rate_bands = bands.remove(&row.id).unwrap_or_default();
                row.into_rate(rate_bands)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_rates(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rates")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting rates: {}", e);
                AppError::Database(format!("Failed to count rates: {}", e))
            })?;

        Ok(result.0)
    }
}

/// Helper struct for mapping rate rows
#[derive(Debug, FromRow)]
struct RateRow {
    id: i32,
    starting_country: String,
    destination_country: String,
    shipping_channel: String,
    shipping_time_range_min_days: i32,
    shipping_time_range_max_days: i32,
    created_at: DateTime<Utc>,
}

impl RateRow {
    fn into_rate(self, bands: Vec<RateBand>) -> Rate {
        Rate {
            id: self.id,
            starting_country: self.starting_country,
            destination_country: self.destination_country,
            shipping_channel: self.shipping_channel,
            shipping_time_range_min_days: self.shipping_time_range_min_days,
            shipping_time_range_max_days: self.shipping_time_range_max_days,
            bands,
            created_at: self.created_at,
        }
    }
}

/// Helper struct for mapping rate band rows
#[derive(Debug, FromRow)]
struct RateBandRow {
    id: i32,
    rate_id: i32,
    min_weight_kg: Decimal,
    max_weight_kg: Decimal,
    per_kg_rate: Decimal,
}

impl From<RateBandRow> for RateBand {
    fn from(row: RateBandRow) -> Self {
        Self {
            id: row.id,
            min_weight_kg: row.min_weight_kg,
            max_weight_kg: row.max_weight_kg,
            per_kg_rate: row.per_kg_rate,
        }
    }
}

/// Helper struct for mapping lookup rows (band joined with its rate)
#[derive(Debug, FromRow)]
struct BandMatchRow {
    rate_id: i32,
    band_id: i32,
    shipping_channel: String,
    per_kg_rate: Decimal,
    shipping_time_range_min_days: i32,
    shipping_time_range_max_days: i32,
}

impl From<BandMatchRow> for BandMatch {
    fn from(row: BandMatchRow) -> Self {
        Self {
            rate_id: row.rate_id,
            band_id: row.band_id,
            shipping_channel: row.shipping_channel,
            per_kg_rate: row.per_kg_rate,
            shipping_time_range: ShippingTimeRange {
                min_days: row.shipping_time_range_min_days,
                max_days: row.shipping_time_range_max_days,
            },
        }
    }
}
