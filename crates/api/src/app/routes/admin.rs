//! Operator endpoints: on-demand reload and the Visma push.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::info;

use catalog_infra::push_to_visma;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/reload", post(reload))
        .route("/push-to-visma", post(push_to_visma_handler))
}

/// Run one refresh cycle now and report what it published.
pub async fn reload(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.refresh.refresh().await {
        Ok(outcome) => (StatusCode::OK, Json(dto::ReloadResponse::from(outcome))).into_response(),
        Err(e) => errors::refresh_error_to_response(e),
    }
}

/// Push the current snapshot to Visma, one article per product.
pub async fn push_to_visma_handler(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let snapshot = services.store.snapshot();
    info!(product_count = snapshot.len(), "visma push requested");

    match push_to_visma(&snapshot, &services.visma, services.http.clone()).await {
        Ok(result) => (StatusCode::OK, Json(dto::PushResponse::from(result))).into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}
