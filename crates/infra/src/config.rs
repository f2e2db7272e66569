//! Configuration loading and representation.
//!
//! Everything comes from the process environment (optionally seeded from a
//! `.env` file). Visma credentials are optional at startup and only checked
//! when a push is requested.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const SHEET_CSV_URL: &str = "SHEET_CSV_URL";
pub const CATALOG_BIND_ADDR: &str = "CATALOG_BIND_ADDR";
pub const REFRESH_INTERVAL_SECS: &str = "REFRESH_INTERVAL_SECS";
pub const FEED_TIMEOUT_SECS: &str = "FEED_TIMEOUT_SECS";
pub const VISMA_BASE_URL: &str = "VISMA_BASE_URL";
pub const VISMA_CLIENT_ID: &str = "VISMA_CLIENT_ID";
pub const VISMA_CLIENT_SECRET: &str = "VISMA_CLIENT_SECRET";
pub const VISMA_TOKEN_URL: &str = "VISMA_TOKEN_URL";

/// Default listener address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default period between background refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Default timeout for one feed download.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Default Visma identity endpoint (OAuth2 client-credentials).
pub const DEFAULT_VISMA_TOKEN_URL: &str = "https://identity.vismaonline.com/connect/token";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub feed: FeedConfig,
    pub refresh_interval: Duration,
    pub visma: VismaSettings,
}

/// Where the catalog feed lives.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub timeout: Duration,
}

/// Visma settings as found in the environment (possibly incomplete).
#[derive(Clone, Default)]
pub struct VismaSettings {
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
}

/// Complete Visma settings, ready for a push.
#[derive(Clone)]
pub struct VismaConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        let url = get(SHEET_CSV_URL).ok_or_else(|| ConfigError::Missing(vec![SHEET_CSV_URL]))?;

        let bind_addr = get(CATALOG_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: CATALOG_BIND_ADDR,
                reason: e.to_string(),
            })?;

        let refresh_secs = parse_secs(get(REFRESH_INTERVAL_SECS), REFRESH_INTERVAL_SECS)?
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
        let timeout_secs = parse_secs(get(FEED_TIMEOUT_SECS), FEED_TIMEOUT_SECS)?
            .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS);

        Ok(Self {
            bind_addr,
            feed: FeedConfig {
                url,
                timeout: Duration::from_secs(timeout_secs),
            },
            refresh_interval: Duration::from_secs(refresh_secs),
            visma: VismaSettings {
                base_url: get(VISMA_BASE_URL),
                client_id: get(VISMA_CLIENT_ID),
                client_secret: get(VISMA_CLIENT_SECRET),
                token_url: get(VISMA_TOKEN_URL).unwrap_or_else(|| DEFAULT_VISMA_TOKEN_URL.to_string()),
            },
        })
    }
}

impl VismaSettings {
    /// Require every Visma value, naming all the missing ones at once.
    pub fn resolve(&self) -> Result<VismaConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.base_url.is_none() {
            missing.push(VISMA_BASE_URL);
        }
        if self.client_id.is_none() {
            missing.push(VISMA_CLIENT_ID);
        }
        if self.client_secret.is_none() {
            missing.push(VISMA_CLIENT_SECRET);
        }

        match (&self.base_url, &self.client_id, &self.client_secret) {
            (Some(base_url), Some(client_id), Some(client_secret)) => Ok(VismaConfig {
                base_url: base_url.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                token_url: self.token_url.clone(),
            }),
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}

impl core::fmt::Debug for VismaSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VismaSettings")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl core::fmt::Debug for VismaConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VismaConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_secs(raw: Option<String>, key: &'static str) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Some(secs)),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
