//! Quote handlers

use crate::dto::{QuoteRequest, QuotesResponse};
use actix_web::{web, HttpResponse};
use shipquote_core::traits::QuoteService;
use shipquote_core::AppError;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Price a shipment on every matching rate band
///
/// POST /v1/quotes
#[instrument(
    skip(service, req),
    fields(origin = %req.starting_country, destination = %req.destination_country)
)]
pub async fn create_quotes(
    service: web::Data<dyn QuoteService>,
    req: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Quote request validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let boxes = req.shipment_boxes();
    debug!(boxes = boxes.len(), "Calculating quotes");

    let quotes = service
        .calculate_quotes(&req.starting_country, &req.destination_country, &boxes)
        .await?;

    info!(quotes = quotes.len(), "Quotes calculated");

    Ok(HttpResponse::Ok().json(QuotesResponse::from(quotes)))
}

/// Configure quote routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/quotes", web::post().to(create_quotes));
}
