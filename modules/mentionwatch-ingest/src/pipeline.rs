//! The batch orchestrator: one sequential pass over the configured keywords.
//!
//! Keywords run one at a time on purpose. The dedup gate is a read-then-write
//! against storage, so concurrent keyword workers could both see "not found"
//! for the same text and both insert. Sequential execution preserves text
//! uniqueness without locking; parallelizing would require an atomic
//! insert-if-absent (uniqueness constraint with conflict-ignore) instead.

use anyhow::Result;
use tracing::{info, warn};

use llm_client::util::truncate_chars;
use mentionwatch_common::{NewMention, RunReport};

use crate::extractor;
use crate::normalize;
use crate::snippets;
use crate::traits::{CompletionProvider, MentionStore, SearchProvider};

pub struct IngestPipeline<S, L, M> {
    search: S,
    llm: L,
    store: M,
    keywords: Vec<String>,
}

impl<S, L, M> IngestPipeline<S, L, M>
where
    S: SearchProvider,
    L: CompletionProvider,
    M: MentionStore,
{
    pub fn new(search: S, llm: L, store: M, keywords: Vec<String>) -> Self {
        Self {
            search,
            llm,
            store,
            keywords,
        }
    }

    /// Execute one ingestion run across all configured keywords.
    ///
    /// Search, extraction, and parse failures are contained at the keyword
    /// boundary and recorded in the report's diagnostic trace. Storage
    /// failures are fatal to the whole run: swallowing them would corrupt
    /// the saved-count guarantee.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        for keyword in &self.keywords {
            let block = self.gather_snippets(keyword, &mut report).await;
            if block.trim().is_empty() {
                report.diag(format!(
                    "No snippets gathered from search results for '{keyword}'. Skipping."
                ));
                continue;
            }

            info!(keyword, chars = block.len(), "Analyzing gathered snippets");

            let raw = match self.extract(keyword, &block).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(keyword, error = %e, "LLM extraction failed");
                    report.diag(format!("LLM extraction failed for '{keyword}': {e}"));
                    continue;
                }
            };
            report.diag(format!("Raw LLM response for '{keyword}': {raw}"));

            let candidates = match extractor::parse_candidates(&raw) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(keyword, error = %e, "Unparsable LLM response");
                    report.diag(format!(
                        "Failed to parse JSON from LLM for '{keyword}': {e}. Raw text: {raw}"
                    ));
                    continue;
                }
            };

            report.total_analyzed += candidates.len();

            for candidate in candidates {
                let mention = normalize::normalize(keyword, candidate);
                if self.persist_if_new(&mention).await? {
                    report.saved_count += 1;
                }
            }
        }

        info!(
            saved = report.saved_count,
            analyzed = report.total_analyzed,
            "Ingestion run finished"
        );
        Ok(report)
    }

    /// Fetch search snippets for one keyword and assemble the delimited text
    /// block. Upstream failure is recorded as a diagnostic and yields an
    /// empty block; it never aborts the run.
    async fn gather_snippets(&self, keyword: &str, report: &mut RunReport) -> String {
        let query = snippets::search_query(keyword);
        match self.search.search(&query).await {
            Ok(hits) => snippets::assemble_block(&hits),
            Err(e) => {
                warn!(keyword, error = %e, "Search failed");
                report.diag(format!("Search failed for '{keyword}': {e}"));
                String::new()
            }
        }
    }

    /// Submit the (truncated) snippet block for extraction and return the
    /// raw completion text.
    async fn extract(&self, keyword: &str, block: &str) -> Result<String> {
        let system = extractor::system_prompt(keyword);
        let user = truncate_chars(block, extractor::INPUT_CHAR_BUDGET);
        let raw = self
            .llm
            .complete(
                &system,
                user,
                extractor::EXTRACTION_TEMPERATURE,
                extractor::EXTRACTION_MAX_TOKENS,
            )
            .await?;
        Ok(raw.trim().to_string())
    }

    /// Dedup gate: skip when a mention with identical text already exists,
    /// otherwise insert. Returns whether a row was written.
    async fn persist_if_new(&self, mention: &NewMention) -> Result<bool> {
        if self.store.find_by_text(&mention.text).await?.is_some() {
            return Ok(false);
        }
        let stored = self.store.insert(mention).await?;
        info!(
            id = %stored.id,
            keyword = %stored.keyword,
            sentiment = %stored.sentiment,
            "Stored new mention"
        );
        Ok(true)
    }
}
