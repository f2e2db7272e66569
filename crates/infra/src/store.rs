//! Catalog store: the single shared, atomically swappable snapshot.
//!
//! Readers load an `Arc` without locking. Writers build the next
//! [`PublishedCatalog`] completely and publish it with one compare-and-swap,
//! so a reader gets either the old or the new catalog, never a mix. The
//! snapshot and its refresh metadata travel in the same `Arc`.

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use chrono::{DateTime, Utc};

use catalog_products::CatalogSnapshot;

/// A snapshot together with the metadata of the refresh that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCatalog {
    pub snapshot: CatalogSnapshot,
    /// When the refresh that produced this snapshot completed.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Number of snapshots published so far (0 = nothing loaded yet).
    pub generation: u64,
}

impl PublishedCatalog {
    fn initial(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            refreshed_at: None,
            generation: 0,
        }
    }

    fn succeed(prev: &Self, snapshot: CatalogSnapshot, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            snapshot,
            refreshed_at: Some(refreshed_at),
            generation: prev.generation + 1,
        }
    }
}

/// Owner of the current catalog.
#[derive(Debug)]
pub struct CatalogStore {
    current: ArcSwap<PublishedCatalog>,
}

impl CatalogStore {
    /// Empty store (generation 0). The service refreshes before serving.
    pub fn new() -> Self {
        Self::with_snapshot(CatalogSnapshot::empty())
    }

    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(PublishedCatalog::initial(snapshot)),
        }
    }

    /// The current catalog and its metadata. Lock-free.
    pub fn current(&self) -> Arc<PublishedCatalog> {
        self.current.load_full()
    }

    /// Shortcut for the current snapshot only.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current.load().snapshot.clone()
    }

    /// Publish `snapshot` as the new current catalog.
    ///
    /// Safe under concurrent callers: each call publishes exactly once, the
    /// generation grows by one per call, and the last call to complete wins.
    pub fn replace(&self, snapshot: CatalogSnapshot, refreshed_at: DateTime<Utc>) -> Arc<PublishedCatalog> {
        let mut prev = self.current.load_full();
        loop {
            let next = Arc::new(PublishedCatalog::succeed(&prev, snapshot.clone(), refreshed_at));
            let seen = self.current.compare_and_swap(&prev, Arc::clone(&next));
            if Arc::ptr_eq(&*seen, &prev) {
                return next;
            }
            // Lost the race to another writer; rebase on what it published.
            prev = Guard::into_inner(seen);
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
