//! Catalog fetcher
//!
//! Issues a single GET against the catalog endpoint and hands back the body
//! as a JSON document. There is no retry: one attempt, bounded by the client
//! timeouts, either produces a document or an error.

use crate::{
    EgressError, Result,
    client::{HttpClientConfig, create_client},
};
use packindex_core::{GroupMap, group_by_tag};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Catalog endpoint queried when no other URL is configured
pub const DEFAULT_PACKS_URL: &str = "https://api.ampifymusic.com/packs";

/// Fetches the pack catalog from one URL
#[derive(Debug, Clone)]
pub struct PackFetcher {
    url: Url,
    client: Client,
}

impl PackFetcher {
    /// Create a fetcher for `url`
    ///
    /// # Errors
    /// - `EgressError::Config` if the URL is not absolute or the client
    ///   cannot be built
    pub fn new(url: &str, client_config: &HttpClientConfig) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| EgressError::Config(format!("Invalid catalog URL '{}': {}", url, e)))?;
        let client = create_client(client_config)?;
        Ok(Self { url, client })
    }

    /// Fetcher for the default catalog endpoint
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_PACKS_URL, &HttpClientConfig::default())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// GET the catalog and parse the body as JSON
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Value> {
        debug!("Requesting catalog");

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Catalog response received");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(EgressError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        // Parse the raw bytes; JSON must be UTF-8, so nothing is lossily decoded
        let body = response.bytes().await?;
        let document = serde_json::from_slice::<Value>(&body).map_err(EgressError::Parse)?;

        info!(bytes = body.len(), "Fetched catalog");
        Ok(document)
    }

    /// Fetch the catalog and group its packs by genre
    pub async fn fetch_and_group(&self) -> Result<GroupMap> {
        let document = self.fetch().await?;
        Ok(group_by_tag(document)?)
    }
}

/// Fetch `url` once with the default client configuration
pub async fn fetch(url: &str) -> Result<Value> {
    PackFetcher::new(url, &HttpClientConfig::default())?
        .fetch()
        .await
}
