//! Trait abstractions for the ingestion pipeline's external collaborators.
//!
//! SearchProvider wraps the search API, CompletionProvider the LLM, and
//! MentionStore the database. Tests swap in in-memory mocks: no network,
//! no Postgres, `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use firecrawl_client::FirecrawlClient;
use llm_client::LlmClient;
use mentionwatch_common::{Mention, MentionWatchError, NewMention};

/// One search hit, normalized to the pipeline's (url, title, text) shape.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub url: String,
    pub title: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// SearchProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query and return normalized snippets.
    async fn search(&self, query: &str) -> Result<Vec<Snippet>>;
}

#[async_trait]
impl SearchProvider for FirecrawlClient {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>> {
        let results = FirecrawlClient::search(self, query)
            .await
            .map_err(|e| MentionWatchError::Search(e.to_string()))?;
        Ok(results
            .into_iter()
            .map(|r| Snippet {
                text: r.snippet().to_string(),
                url: r.url.unwrap_or_default(),
                title: r.title.unwrap_or_default(),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// CompletionProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit a system instruction and user turn, returning the raw
    /// completion text with no parsing applied.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        LlmClient::complete(self, system, user, temperature, max_tokens)
            .await
            .map_err(|e| MentionWatchError::Extraction(e.to_string()).into())
    }
}

// ---------------------------------------------------------------------------
// MentionStore
// ---------------------------------------------------------------------------

#[async_trait]
pub trait MentionStore: Send + Sync {
    /// Find a stored mention with exactly this text, if any.
    async fn find_by_text(&self, text: &str) -> Result<Option<Mention>>;

    /// Insert a new mention. Storage assigns `id` and `created_at`.
    async fn insert(&self, mention: &NewMention) -> Result<Mention>;

    /// All stored mentions, most recent first.
    async fn list_recent(&self) -> Result<Vec<Mention>>;
}

// Also implemented for Arc<M> and &M so one store can be shared between the
// pipeline and the read endpoints, and so tests can keep a handle for
// assertions after the run.
#[async_trait]
impl<M: MentionStore + ?Sized> MentionStore for std::sync::Arc<M> {
    async fn find_by_text(&self, text: &str) -> Result<Option<Mention>> {
        (**self).find_by_text(text).await
    }

    async fn insert(&self, mention: &NewMention) -> Result<Mention> {
        (**self).insert(mention).await
    }

    async fn list_recent(&self) -> Result<Vec<Mention>> {
        (**self).list_recent().await
    }
}

#[async_trait]
impl<M: MentionStore + ?Sized> MentionStore for &M {
    async fn find_by_text(&self, text: &str) -> Result<Option<Mention>> {
        (**self).find_by_text(text).await
    }

    async fn insert(&self, mention: &NewMention) -> Result<Mention> {
        (**self).insert(mention).await
    }

    async fn list_recent(&self) -> Result<Vec<Mention>> {
        (**self).list_recent().await
    }
}
