//! ShipQuote Server
//!
//! HTTP service that prices shipments against the rate catalog.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use shipquote_api::{configure, json_config, query_config};
use shipquote_core::config::{AppConfig, CatalogBackend, CatalogConfig, DatabaseConfig};
use shipquote_core::traits::{QuoteService, RateCatalog};
use shipquote_db::{create_pool, run_migrations, InMemoryRateCatalog, PgRateCatalog};
use shipquote_services::{seed_catalog, QuoteCalculationService};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "shipquote={lvl},shipquote_api={lvl},shipquote_services={lvl},shipquote_db={lvl},actix_web=info,sqlx=warn",
            lvl = log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the configured rate catalog
async fn build_catalog(
    catalog: &CatalogConfig,
    database: &DatabaseConfig,
) -> anyhow::Result<Arc<dyn RateCatalog>> {
    let store: Arc<dyn RateCatalog> = match catalog.backend {
        CatalogBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(database)
                .await
                .context("Failed to create database pool")?;

            info!(
                "Database connection established with {} max connections",
                database.max_connections
            );

            if catalog.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to apply migrations")?;
            }

            Arc::new(PgRateCatalog::new(pool))
        }
        CatalogBackend::Memory => {
            warn!("Using in-memory rate catalog; rates are lost on restart");
            Arc::new(InMemoryRateCatalog::new())
        }
    };

    if catalog.seed_on_startup {
        if store.count_rates().await? > 0 {
            info!("Catalog already holds rates, skipping seed");
        } else {
            let created = seed_catalog(store.as_ref()).await?;
            info!("Seeded {} standard rates", created);
        }
    }

    Ok(store)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting ShipQuote v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load configuration")?;

    let catalog = build_catalog(&config.catalog, &config.database).await?;
    let quotes: Arc<dyn QuoteService> = Arc::new(QuoteCalculationService::new(catalog.clone()));

    let catalog_data = web::Data::from(catalog);
    let quotes_data = web::Data::from(quotes);

    let bind_addr = config.server_addr();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, config.server.workers
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(catalog_data.clone())
            .app_data(quotes_data.clone())
            .app_data(json_config())
            .app_data(query_config())
            // Middleware
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(config.server.workers)
    .client_request_timeout(Duration::from_secs(config.server.timeout_secs))
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
