use axum::Router;

pub mod admin;
pub mod products;
pub mod system;

/// Router for the catalog endpoints (health is mounted by `build_app`).
pub fn router() -> Router {
    Router::new()
        .nest("/products/admin", admin::router())
        .nest("/products", products::router())
}
