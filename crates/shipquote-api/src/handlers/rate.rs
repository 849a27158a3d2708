//! Rate catalog handlers
//!
//! Administration endpoints for creating and browsing rates with their
//! weight bands.

use crate::dto::{ApiResponse, PaginationParams, RateCreateRequest, RateResponse};
use actix_web::{web, HttpResponse};
use shipquote_core::traits::RateCatalog;
use shipquote_core::AppError;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List rates with pagination
///
/// GET /v1/rates
#[instrument(skip(catalog))]
pub async fn list_rates(
    catalog: web::Data<dyn RateCatalog>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(page = query.page, per_page = query.per_page, "Listing rates");

    let rates = catalog.list_rates(query.limit(), query.offset()).await?;
    let total = catalog.count_rates().await?;

    let data: Vec<RateResponse> = rates.into_iter().map(RateResponse::from).collect();

    Ok(HttpResponse::Ok().json(query.paginate(data, total)))
}

/// Create a rate together with its bands
///
/// POST /v1/rates
#[instrument(skip(catalog, req))]
pub async fn create_rate(
    catalog: web::Data<dyn RateCatalog>,
    req: web::Json<RateCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Rate creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(
        origin = %req.starting_country,
        destination = %req.destination_country,
        channel = %req.shipping_channel,
        "Creating rate"
    );

    let created = catalog.create_rate_with_bands(&req.to_new_rate()).await?;

    info!(id = created.id, bands = created.bands.len(), "Rate created");

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        RateResponse::from(created),
        "Rate created",
    )))
}

/// Get a rate by ID
///
/// GET /v1/rates/{id}
#[instrument(skip(catalog))]
pub async fn get_rate(
    catalog: web::Data<dyn RateCatalog>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let rate_id = path.into_inner();

    let rate = catalog
        .find_rate(rate_id)
        .await?
        .ok_or_else(|| AppError::RateNotFound(rate_id.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RateResponse::from(rate))))
}

/// Configure rate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rates")
            .route("", web::get().to(list_rates))
            .route("", web::post().to(create_rate))
            .route("/{id}", web::get().to(get_rate)),
    );
}
