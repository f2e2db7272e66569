//! Infrastructure layer: feed download, snapshot store, refresh scheduling,
//! Visma adapters and configuration.

pub mod config;
pub mod error;
pub mod feed;
pub mod reconcile;
pub mod refresh;
pub mod store;
pub mod visma;

pub use config::{AppConfig, VismaSettings};
pub use error::{AuthError, ConfigError, FetchError, RefreshError, SyncError};
pub use feed::{FeedSource, HttpFeedSource};
pub use reconcile::{push_to_visma, ReconciliationResult};
pub use refresh::{RefreshCoordinator, RefreshOutcome, RefreshStats};
pub use store::{CatalogStore, PublishedCatalog};
