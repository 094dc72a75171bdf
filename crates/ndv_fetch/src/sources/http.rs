use std::time::Duration;

use async_trait::async_trait;
use ndv_core::{Error, FetchQuery, RawArticle, Result};
use reqwest::Client;
use url::Url;

use super::ArticleSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The `/articles` endpoint of a backend.
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.host_str().is_none() {
            return Err(Error::InvalidUrl(format!("No host in {}", endpoint)));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn request_url(&self, query: &FetchQuery) -> Result<Url> {
        query.apply_to(self.endpoint.as_str())
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>> {
        let url = self.request_url(query)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }

        // A `null` body is an empty collection.
        let body = response.text().await?;
        let articles: Option<Vec<RawArticle>> = serde_json::from_str(&body)?;
        Ok(articles.unwrap_or_default())
    }
}
