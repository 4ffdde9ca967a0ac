use serde::{Deserialize, Serialize};

/// Request body for the Firecrawl `/v1/search` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: ScrapeOptions,
}

/// Output-format hint for search result scraping.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
}

/// Top-level response from `/v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<SearchResult>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A single search hit. `description` is the search engine's own snippet;
/// `markdown` is the scraped page body when the format hint requested it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

impl SearchResult {
    /// Returns the best text for downstream extraction, preferring the
    /// search-engine description over the full scraped body.
    pub fn snippet(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.markdown.as_deref())
            .unwrap_or("")
    }
}
