use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_infra::reconcile::{ReconciliationResult, RecordFailure};
use catalog_infra::{PublishedCatalog, RefreshOutcome, RefreshStats};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub count: usize,
}

impl From<RefreshOutcome> for ReloadResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            status: "reloaded",
            count: outcome.product_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PushResponse {
    pub status: &'static str,
    pub created: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
}

impl From<ReconciliationResult> for PushResponse {
    fn from(result: ReconciliationResult) -> Self {
        Self {
            status: "pushed",
            created: result.succeeded,
            failed: result.failed,
            failures: result.failures,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    pub last_reload: Option<DateTime<Utc>>,
    pub generation: u64,
    pub refresh_attempts: u64,
    pub refresh_failures: u64,
}

impl HealthResponse {
    pub fn new(current: &PublishedCatalog, stats: RefreshStats) -> Self {
        Self {
            status: "ok",
            products: current.snapshot.len(),
            last_reload: current.refreshed_at,
            generation: current.generation,
            refresh_attempts: stats.attempts,
            refresh_failures: stats.failures,
        }
    }
}
