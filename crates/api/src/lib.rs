//! HTTP API: routing, handlers and request/response mapping for the catalog.

pub mod app;
pub mod server;
