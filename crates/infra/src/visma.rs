//! Visma eAccounting client adapters.
//!
//! Two seams: [`CredentialProvider`] trades client credentials for a bearer
//! token (once per push), and [`RecordClient`] creates one article per call.
//! The HTTP implementations speak the Visma wire format; tests and the
//! reconciliation driver only see the traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use catalog_products::Product;

use crate::config::VismaConfig;
use crate::error::{AuthError, RecordSyncError};

/// OAuth2 bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Outbound article payload: `{"Number": sku, "Name": name, "UnitPrice": price}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewRecord {
    #[serde(rename = "Number")]
    pub sku: String,
    pub name: String,
    #[serde(rename = "UnitPrice")]
    pub price: f64,
}

impl From<&Product> for NewRecord {
    fn from(product: &Product) -> Self {
        Self {
            sku: product.sku().to_string(),
            name: product.name().to_string(),
            price: product.price().to_f64(),
        }
    }
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn acquire(&self) -> Result<AccessToken, AuthError>;
}

#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn create_record(&self, token: &AccessToken, record: &NewRecord) -> Result<(), RecordSyncError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client-credentials grant against the Visma identity server.
#[derive(Debug, Clone)]
pub struct VismaCredentialProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl VismaCredentialProvider {
    pub fn new(client: reqwest::Client, config: &VismaConfig) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl CredentialProvider for VismaCredentialProvider {
    async fn acquire(&self) -> Result<AccessToken, AuthError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let resp = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        Ok(AccessToken(parsed.access_token))
    }
}

/// Creates articles through the Visma REST API.
#[derive(Debug, Clone)]
pub struct VismaRecordClient {
    client: reqwest::Client,
    articles_url: String,
}

impl VismaRecordClient {
    pub fn new(client: reqwest::Client, config: &VismaConfig) -> Self {
        Self {
            client,
            articles_url: format!("{}/articles", config.base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RecordClient for VismaRecordClient {
    async fn create_record(&self, token: &AccessToken, record: &NewRecord) -> Result<(), RecordSyncError> {
        let resp = self
            .client
            .post(&self.articles_url)
            .bearer_auth(token.secret())
            .json(record)
            .send()
            .await
            .map_err(|e| RecordSyncError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(RecordSyncError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
