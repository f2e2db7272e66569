use std::sync::Arc;

use catalog_infra::{CatalogStore, RefreshCoordinator, VismaSettings};

/// Shared state handed to every handler through an `Extension`.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub store: Arc<CatalogStore>,
    pub refresh: Arc<RefreshCoordinator>,
    pub visma: VismaSettings,
    /// Outbound client for Visma calls (connection pool shared across pushes).
    pub http: reqwest::Client,
}

impl AppServices {
    pub fn new(refresh: Arc<RefreshCoordinator>, visma: VismaSettings, http: reqwest::Client) -> Self {
        Self {
            store: Arc::clone(refresh.store()),
            refresh,
            visma,
            http,
        }
    }
}
