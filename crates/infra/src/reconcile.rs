//! Catalog → Visma reconciliation.
//!
//! Authenticate once, then create one article per product in snapshot order.
//! Per-record failures are counted and logged; they never abort the run.
//! Only a configuration or credential failure aborts, and it does so before
//! any record is attempted.

use serde::Serialize;
use tracing::{info, warn};

use catalog_products::CatalogSnapshot;

use crate::config::VismaSettings;
use crate::error::{AuthError, SyncError};
use crate::visma::{CredentialProvider, NewRecord, RecordClient, VismaCredentialProvider, VismaRecordClient};

/// Tally of one reconciliation run. `succeeded + failed` equals the snapshot size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub sku: String,
    pub reason: String,
}

/// Push every product of `snapshot` through `records`.
pub async fn reconcile<C, R>(
    snapshot: &CatalogSnapshot,
    credentials: &C,
    records: &R,
) -> Result<ReconciliationResult, AuthError>
where
    C: CredentialProvider + ?Sized,
    R: RecordClient + ?Sized,
{
    let token = credentials.acquire().await?;

    let mut result = ReconciliationResult::default();
    for product in snapshot.iter() {
        let record = NewRecord::from(product);
        match records.create_record(&token, &record).await {
            Ok(()) => result.succeeded += 1,
            Err(err) => {
                warn!(sku = %record.sku, error = %err, "visma record sync failed");
                result.failed += 1;
                result.failures.push(RecordFailure {
                    sku: record.sku,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        "visma reconciliation finished"
    );
    Ok(result)
}

/// Resolve settings, build the HTTP adapters and reconcile `snapshot`.
pub async fn push_to_visma(
    snapshot: &CatalogSnapshot,
    settings: &VismaSettings,
    client: reqwest::Client,
) -> Result<ReconciliationResult, SyncError> {
    let config = settings.resolve()?;
    let credentials = VismaCredentialProvider::new(client.clone(), &config);
    let records = VismaRecordClient::new(client, &config);

    Ok(reconcile(snapshot, &credentials, &records).await?)
}
