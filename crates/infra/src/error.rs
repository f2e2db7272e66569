//! Infrastructure error taxonomy.
//!
//! - `FetchError` / `ParseError` abort one refresh cycle (previous snapshot stays).
//! - `ConfigError` / `AuthError` abort a whole Visma push before any record.
//! - `RecordSyncError` is per record and only ever counted.

use thiserror::Error;

pub use catalog_products::ParseError;

/// Failure reaching the sheet feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("feed request timed out")]
    Timeout,

    #[error("feed transport error: {0}")]
    Transport(String),

    #[error("feed returned HTTP {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// One refresh cycle failed; the previously published snapshot is still current.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("feed is malformed: {0}")]
    Parse(#[from] ParseError),
}

/// Credential exchange with the identity endpoint failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(String),

    #[error("token request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("token response unreadable: {0}")]
    MalformedResponse(String),
}

/// A single record could not be created in the external system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSyncError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Required configuration is missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A Visma push was aborted before any record was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
