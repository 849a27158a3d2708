//! Load the standard rate tables into PostgreSQL
//!
//! Usage: `populate_db [config-file]`. Without an argument the regular
//! layered configuration is used.

use anyhow::{bail, Context};
use shipquote_core::config::AppConfig;
use shipquote_core::traits::RateCatalog;
use shipquote_db::{create_pool, run_migrations, PgRateCatalog};
use shipquote_services::seed_catalog;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .with_target(false)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };

    if config.database.url.is_none() {
        bail!("DATABASE_URL (or SHIPQUOTE__DATABASE__URL) must be set");
    }

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let catalog = PgRateCatalog::new(pool);

    let existing = catalog.count_rates().await?;
    if existing > 0 {
        warn!("Catalog already holds {} rates, adding the standard tables again", existing);
    }

    let created = seed_catalog(&catalog).await?;
    info!("Created {} rates", created);

    Ok(())
}
