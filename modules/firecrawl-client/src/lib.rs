//! Minimal Firecrawl API client.
//!
//! Only the `/v1/search` endpoint is wrapped: searching the index engines
//! returns real snippet text for pages that block direct scraping.

pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{ScrapeOptions, SearchRequest, SearchResponse, SearchResult};

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

#[derive(Clone)]
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Run a search query, asking Firecrawl to include markdown for each hit.
    /// Returns the hits, or an error for transport failures, non-2xx
    /// statuses, and `success: false` payloads.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let request = SearchRequest {
            query: query.to_string(),
            scrape_options: ScrapeOptions {
                formats: vec!["markdown".to_string()],
            },
        };

        tracing::debug!(query, "Firecrawl search request");

        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        if !search.success {
            return Err(FirecrawlError::SearchFailed(
                search.error.unwrap_or_else(|| "no error detail".to_string()),
            ));
        }

        let results = search.data.unwrap_or_default();
        tracing::info!(query, count = results.len(), "Firecrawl search completed");
        Ok(results)
    }
}
