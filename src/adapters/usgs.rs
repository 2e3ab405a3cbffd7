use crate::core::feed::ensure_feature_collection;
use crate::domain::model::FeedDocument;
use crate::domain::ports::FeedSource;
use crate::utils::error::{QuakeError, Result};
use reqwest::Client;
use std::time::Duration;

/// Fetches a GeoJSON summary feed over HTTP(S).
#[derive(Debug, Clone)]
pub struct UsgsFeedClient {
    client: Client,
    url: String,
}

impl UsgsFeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quake-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for UsgsFeedClient {
    async fn fetch(&self) -> Result<FeedDocument> {
        tracing::debug!("Requesting earthquake feed: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);
        if !status.is_success() {
            return Err(QuakeError::FeedStatusError {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let document: FeedDocument =
            serde_json::from_slice(&body).map_err(|e| QuakeError::FeedFormatError {
                message: e.to_string(),
            })?;
        ensure_feature_collection(&document)?;

        tracing::debug!("Feed contains {} features", document.features.len());
        Ok(document)
    }
}
