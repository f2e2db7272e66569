//! Refresh coordination (fetch → parse → publish).
//!
//! A **refresh cycle** downloads the raw feed, parses it into products and
//! publishes the result into the [`CatalogStore`]. Any failure leaves the
//! previously published catalog (and its metadata) untouched.
//!
//! ## Triggers
//!
//! ```text
//! startup ──────┐
//! timer tick ───┼──► RefreshCoordinator::refresh() ──► CatalogStore::replace()
//! POST reload ──┘          (serialized)
//! ```
//!
//! - **Startup**: the binary awaits one refresh before binding its listener
//!   and exits if it fails.
//! - **Timer**: [`RefreshCoordinator::spawn_periodic`] runs a refresh every
//!   period. A failing tick is logged and the loop carries on.
//! - **On demand**: the reload endpoint awaits [`RefreshCoordinator::refresh`]
//!   and reports the outcome.
//!
//! ## Serialization
//!
//! Cycles run one at a time behind an async mutex. A trigger that arrives
//! while a cycle is in flight waits for it and then runs its own full cycle,
//! so every caller gets a refresh that started after it asked, and an older
//! download can never be published over a newer one.
//!
//! ## Cancellation
//!
//! The periodic task watches a `CancellationToken` both between ticks and
//! while a cycle is in flight; on cancellation it abandons the cycle and
//! returns without scheduling another tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use catalog_products::{parse_catalog, CatalogSnapshot};

use crate::error::RefreshError;
use crate::feed::FeedSource;
use crate::store::{CatalogStore, PublishedCatalog};

/// What a successful refresh published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub product_count: usize,
    pub generation: u64,
    pub refreshed_at: DateTime<Utc>,
}

impl RefreshOutcome {
    fn from_published(published: &PublishedCatalog, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            product_count: published.snapshot.len(),
            generation: published.generation,
            refreshed_at,
        }
    }
}

/// Process-lifetime refresh counters (every attempt, successful or not).
#[derive(Debug, Default)]
struct RefreshCounters {
    attempts: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of the refresh counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub attempts: u64,
    pub failures: u64,
}

/// Drives refresh cycles against one feed and one store.
pub struct RefreshCoordinator {
    source: Arc<dyn FeedSource>,
    store: Arc<CatalogStore>,
    gate: Mutex<()>,
    counters: RefreshCounters,
}

impl RefreshCoordinator {
    pub fn new(source: Arc<dyn FeedSource>, store: Arc<CatalogStore>) -> Self {
        Self {
            source,
            store,
            gate: Mutex::new(()),
            counters: RefreshCounters::default(),
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn stats(&self) -> RefreshStats {
        RefreshStats {
            attempts: self.counters.attempts.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Run one full refresh cycle, waiting for any cycle already in flight.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let _turn = self.gate.lock().await;
        self.counters.attempts.fetch_add(1, Ordering::Relaxed);

        match self.run_cycle().await {
            Ok(outcome) => {
                info!(
                    product_count = outcome.product_count,
                    generation = outcome.generation,
                    "catalog refreshed"
                );
                Ok(outcome)
            }
            Err(err) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    async fn run_cycle(&self) -> Result<RefreshOutcome, RefreshError> {
        let raw = self.source.fetch().await?;
        let products = parse_catalog(&raw)?;

        let refreshed_at = Utc::now();
        let published = self.store.replace(CatalogSnapshot::new(products), refreshed_at);
        Ok(RefreshOutcome::from_published(&published, refreshed_at))
    }

    /// Spawn the background refresh loop.
    ///
    /// The first tick fires one `period` after spawning (startup already
    /// refreshed). Missed ticks are skipped rather than bursted.
    pub fn spawn_periodic(self: Arc<Self>, period: Duration, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(period_ms = period.as_millis() as u64, "periodic catalog refresh started");

            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => {
                        debug!("abandoning in-flight catalog refresh");
                        break;
                    }
                    result = self.refresh() => {
                        if let Err(err) = result {
                            warn!(error = %err, "periodic catalog refresh failed; keeping previous snapshot");
                        }
                    }
                }
            }

            info!("periodic catalog refresh stopped");
        })
    }
}

impl core::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("store", &self.store)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
