//! Domain primitives shared by the catalog crates.
//!
//! This crate contains **pure domain** values (no I/O, no async, no HTTP).

pub mod error;
pub mod id;
pub mod money;

pub use error::DomainError;
pub use id::ProductId;
pub use money::Price;
