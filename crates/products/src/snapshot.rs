//! Immutable catalog snapshot.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use catalog_core::ProductId;

use crate::product::Product;

/// An immutable, fully-formed view of the catalog at one point in time.
///
/// Cloning is cheap (shared slice). A refresh never mutates a snapshot; it
/// builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    products: Arc<[Product]>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product with `id` in snapshot order (ids are not deduplicated).
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Products whose name or SKU contains `query`, ignoring case and
    /// surrounding whitespace. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect()
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Product>> for CatalogSnapshot {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

impl Serialize for CatalogSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.products.iter())
    }
}
