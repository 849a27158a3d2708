//! Liveness endpoint

use actix_web::{web, HttpResponse};
use serde_json::json;

/// Health check
///
/// GET /v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "shipquote",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure the health route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
