//! Products catalog module.
//!
//! This crate holds the product value, the immutable catalog snapshot and the
//! feed parser. It is deterministic domain logic (no IO, no HTTP, no storage).

pub mod ingest;
pub mod product;
pub mod snapshot;

pub use ingest::{parse_catalog, ParseError, MIN_FIELDS};
pub use product::Product;
pub use snapshot::CatalogSnapshot;
