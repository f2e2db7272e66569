//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state (store, refresh coordinator, Visma settings)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use catalog_core::{Price, ProductId};
    use catalog_infra::{CatalogStore, FeedSource, FetchError, RefreshCoordinator, VismaSettings};
    use catalog_products::{CatalogSnapshot, Product};

    struct DownFeed;

    #[async_trait]
    impl FeedSource for DownFeed {
        async fn fetch(&self) -> Result<String, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn app_with(products: Vec<Product>) -> Router {
        let store = Arc::new(CatalogStore::with_snapshot(CatalogSnapshot::new(products)));
        let refresh = Arc::new(RefreshCoordinator::new(Arc::new(DownFeed), store));
        build_app(AppServices::new(refresh, VismaSettings::default(), reqwest::Client::new()))
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Widget", "SKU1", Price::from_cents(999), 10),
            Product::new(ProductId::new(2), "Bolt", "SKU2", Price::from_cents(50), 100),
        ]
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn get_product_by_id() {
        let (status, body) = call(app_with(sample()), "GET", "/products/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Bolt");
        assert_eq!(body["price"], 0.5);
    }

    #[tokio::test]
    async fn unknown_or_non_integer_id_is_not_found() {
        let (status, body) = call(app_with(sample()), "GET", "/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, _) = call(app_with(sample()), "GET", "/products/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_route_wins_over_id_route() {
        let (status, body) = call(app_with(sample()), "GET", "/products/search?q=BOLT").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["sku"], "SKU2");
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let (status, _) = call(app_with(sample()), "GET", "/products/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_reload_keeps_serving_old_catalog() {
        let app = app_with(sample());

        let (status, body) = call(app.clone(), "POST", "/products/admin/reload").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "feed_unavailable");

        let (_, body) = call(app.clone(), "GET", "/products").await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, health) = call(app, "GET", "/health").await;
        assert_eq!(health["refreshAttempts"], 1);
        assert_eq!(health["refreshFailures"], 1);
        assert_eq!(health["generation"], 0);
    }

    #[tokio::test]
    async fn push_without_visma_settings_lists_missing_keys() {
        let (status, body) = call(app_with(sample()), "POST", "/products/admin/push-to-visma").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_configuration");
        assert_eq!(
            body["missing"],
            serde_json::json!(["VISMA_BASE_URL", "VISMA_CLIENT_ID", "VISMA_CLIENT_SECRET"])
        );
    }
}
