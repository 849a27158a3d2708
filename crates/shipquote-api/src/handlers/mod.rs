//! HTTP request handlers

pub mod health;
pub mod quote;
pub mod rate;

use actix_web::{error, web};
use shipquote_core::AppError;
use tracing::warn;

pub use health::configure as configure_health;
pub use quote::configure as configure_quotes;
pub use rate::configure as configure_rates;

/// Largest accepted JSON body
const MAX_JSON_PAYLOAD: usize = 1024 * 1024;

/// Mount every API route under `/v1`
///
/// Handlers expect `web::Data<dyn QuoteService>` and `web::Data<dyn RateCatalog>`
/// in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(configure_health)
            .configure(configure_quotes)
            .configure(configure_rates),
    );
}

/// JSON extractor config that reports malformed bodies in the API error format
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_PAYLOAD)
        .error_handler(|err, _req| {
            warn!("Rejected JSON body: {}", err);
            error::Error::from(AppError::Validation(err.to_string()))
        })
}

/// Query extractor config that reports bad parameters in the API error format
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        warn!("Rejected query string: {}", err);
        error::Error::from(AppError::InvalidInput(err.to_string()))
    })
}
