//! Integration tests for the quote and rate handlers
//!
//! Routes run against an in-memory catalog seeded with the standard tables.

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use shipquote_api::{configure, json_config, query_config};
    use shipquote_core::traits::{QuoteService, RateCatalog};
    use shipquote_db::InMemoryRateCatalog;
    use shipquote_services::{seed_catalog, QuoteCalculationService};
    use std::sync::Arc;

    async fn seeded_catalog() -> Arc<dyn RateCatalog> {
        let catalog: Arc<dyn RateCatalog> = Arc::new(InMemoryRateCatalog::new());
        seed_catalog(catalog.as_ref()).await.unwrap();
        catalog
    }

    macro_rules! app {
        ($catalog:expr) => {{
            let catalog: Arc<dyn RateCatalog> = $catalog;
            let service: Arc<dyn QuoteService> =
                Arc::new(QuoteCalculationService::new(catalog.clone()));
            test::init_service(
                App::new()
                    .app_data(web::Data::from(catalog))
                    .app_data(web::Data::from(service))
                    .app_data(json_config())
                    .app_data(query_config())
                    .configure(configure),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::get().uri("/v1/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_china_air_and_ocean_quotes() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .set_json(json!({
                "starting_country": "China",
                "destination_country": "USA",
                "boxes": [
                    {"count": 100, "weight_kg": 10, "length": 200, "width": 20, "height": 30}
                ]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let quotes = body["quotes"].as_array().unwrap();
        assert_eq!(quotes.len(), 2);

        let air = &quotes[0];
        assert_eq!(air["shipping_channel"], "air");
        assert_eq!(air["total_cost"].as_f64(), Some(7400.0));
        assert_eq!(air["cost_breakdown"]["shipping_cost"].as_f64(), Some(7000.0));
        assert_eq!(air["cost_breakdown"]["service_fee"].as_f64(), Some(300.0));
        assert_eq!(air["cost_breakdown"]["oversized_fee"].as_f64(), Some(100.0));
        assert_eq!(air["cost_breakdown"]["overweight_fee"].as_f64(), Some(0.0));
        assert_eq!(air["shipping_time_range"], json!({"min_days": 15, "max_days": 20}));

        let ocean = &quotes[1];
        assert_eq!(ocean["shipping_channel"], "ocean");
        assert_eq!(ocean["total_cost"].as_f64(), Some(2400.0));
    }

    #[actix_web::test]
    async fn test_unknown_route_returns_empty_list() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .set_json(json!({
                "starting_country": "Peru",
                "destination_country": "USA",
                "boxes": [{"count": 1, "weight_kg": 5, "length": 10, "width": 10, "height": 10}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"quotes": []}));
    }

    #[actix_web::test]
    async fn test_invalid_quote_request_is_rejected() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .set_json(json!({
                "starting_country": "China",
                "destination_country": "USA",
                "boxes": [{"count": 0, "weight_kg": 5, "length": 10, "width": 10, "height": 10}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[actix_web::test]
    async fn test_oversized_shipment_is_rejected() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .set_json(json!({
                "starting_country": "China",
                "destination_country": "USA",
                "boxes": [{
                    "count": 1,
                    "weight_kg": 1,
                    "length": 10000000000u64,
                    "width": 10000000000u64,
                    "height": 10000000000u64
                }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input");
    }

    #[actix_web::test]
    async fn test_malformed_body_uses_error_format() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"starting_country": "China""#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
    }

    #[actix_web::test]
    async fn test_create_then_fetch_rate() {
        let app = app!(Arc::new(InMemoryRateCatalog::new()));

        let req = test::TestRequest::post()
            .uri("/v1/rates")
            .set_json(json!({
                "starting_country": "Vietnam",
                "destination_country": "USA",
                "shipping_channel": "air",
                "shipping_time_range": {"min_days": 15, "max_days": 20},
                "bands": [
                    {"min_weight_kg": 0, "max_weight_kg": 100, "per_kg_rate": 5},
                    {"min_weight_kg": 100, "max_weight_kg": 200, "per_kg_rate": 4.5}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        let id = created["data"]["id"].as_i64().unwrap();
        assert_eq!(created["data"]["bands"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/rates/{}", id))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["data"]["shipping_channel"], "air");
        assert_eq!(fetched["data"]["bands"][1]["per_kg_rate"], "4.5");

        // The new rate is immediately quotable
        let req = test::TestRequest::post()
            .uri("/v1/quotes")
            .set_json(json!({
                "starting_country": "Vietnam",
                "destination_country": "USA",
                "boxes": [{"count": 6, "weight_kg": 25, "length": 10, "width": 10, "height": 10}]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["quotes"][0]["total_cost"].as_f64(), Some(675.0));
    }

    #[actix_web::test]
    async fn test_invalid_rate_is_rejected() {
        let app = app!(Arc::new(InMemoryRateCatalog::new()));

        let req = test::TestRequest::post()
            .uri("/v1/rates")
            .set_json(json!({
                "starting_country": "Vietnam",
                "destination_country": "USA",
                "shipping_channel": "air",
                "shipping_time_range": {"min_days": 15, "max_days": 20},
                "bands": [{"min_weight_kg": 200, "max_weight_kg": 100, "per_kg_rate": 5}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/v1/rates").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pagination"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_list_rates_paginates() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::get()
            .uri("/v1/rates?page=2&per_page=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["pagination"]["total"], 5);
        assert_eq!(body["pagination"]["total_pages"], 3);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["starting_country"], "India");
        assert_eq!(data[0]["shipping_channel"], "air");
    }

    #[actix_web::test]
    async fn test_missing_rate_returns_404() {
        let app = app!(seeded_catalog().await);

        let req = test::TestRequest::get().uri("/v1/rates/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "rate_not_found");
    }
}
