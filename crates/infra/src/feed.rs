//! Raw catalog feed sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

/// Something that can hand back the raw CSV text of the catalog.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

#[async_trait]
impl<S> FeedSource for Arc<S>
where
    S: FeedSource + ?Sized,
{
    async fn fetch(&self) -> Result<String, FetchError> {
        (**self).fetch().await
    }
}

/// Downloads the feed over HTTP(S), e.g. a published spreadsheet CSV export.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn fetches_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/export.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("id,name\n1,a"))
            .mount(&server)
            .await;

        let source = HttpFeedSource::new(format!("{}/export.csv", server.uri()), Duration::from_secs(5)).unwrap();
        assert_eq!(source.fetch().await.unwrap(), "id,name\n1,a");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpFeedSource::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert_eq!(source.fetch().await.unwrap_err(), FetchError::Status(503));
    }

    #[tokio::test]
    async fn slow_feed_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let source = HttpFeedSource::new(server.uri(), Duration::from_millis(50)).unwrap();
        assert_eq!(source.fetch().await.unwrap_err(), FetchError::Timeout);
    }
}
