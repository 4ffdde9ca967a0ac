//! End-to-end pipeline tests with in-memory mocks. No network, no database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use mentionwatch_common::{Mention, NewMention, Sentiment};
use mentionwatch_ingest::{
    CompletionProvider, IngestPipeline, MentionStore, SearchProvider, Snippet,
};

// ---------------------------------------------------------------------------
// Mock search provider: canned snippets per keyword, or a forced failure
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockSearch {
    /// keyword → snippets. Queries look like "site:reddit.com <kw> comments".
    results: HashMap<String, Vec<Snippet>>,
    failing: Vec<String>,
}

impl MockSearch {
    fn with_results(mut self, keyword: &str, snippets: Vec<Snippet>) -> Self {
        self.results.insert(keyword.to_string(), snippets);
        self
    }

    fn with_failure(mut self, keyword: &str) -> Self {
        self.failing.push(keyword.to_string());
        self
    }
}

#[async_trait]
impl SearchProvider for &MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>> {
        if let Some(kw) = self.failing.iter().find(|kw| query.contains(kw.as_str())) {
            return Err(anyhow!("search provider unreachable for {kw}"));
        }
        Ok(self
            .results
            .iter()
            .find(|(kw, _)| query.contains(kw.as_str()))
            .map(|(_, snippets)| snippets.clone())
            .unwrap_or_default())
    }
}

fn snippet(url: &str, title: &str, text: &str) -> Snippet {
    Snippet {
        url: url.to_string(),
        title: title.to_string(),
        text: text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Mock completion provider: canned raw response per keyword
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockLlm {
    responses: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockLlm {
    fn with_response(mut self, keyword: &str, raw: &str) -> Self {
        self.responses.insert(keyword.to_string(), raw.to_string());
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for &MockLlm {
    async fn complete(
        &self,
        system: &str,
        _user: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .iter()
            .find(|(kw, _)| system.contains(&format!("\"{kw}\"")))
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| anyhow!("no canned response for prompt"))
    }
}

// ---------------------------------------------------------------------------
// Mock store: Vec behind a Mutex, insertion order preserved
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryStore {
    mentions: Mutex<Vec<Mention>>,
    fail_inserts: bool,
}

impl MemoryStore {
    fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Default::default()
        }
    }

    fn stored(&self) -> Vec<Mention> {
        self.mentions.lock().unwrap().clone()
    }
}

#[async_trait]
impl MentionStore for MemoryStore {
    async fn find_by_text(&self, text: &str) -> Result<Option<Mention>> {
        Ok(self
            .mentions
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.text == text)
            .cloned())
    }

    async fn insert(&self, mention: &NewMention) -> Result<Mention> {
        if self.fail_inserts {
            return Err(anyhow!("connection reset by peer"));
        }
        let stored = Mention {
            id: Uuid::new_v4(),
            keyword: mention.keyword.clone(),
            author: mention.author.clone(),
            text: mention.text.clone(),
            sentiment: mention.sentiment,
            url: mention.url.clone(),
            created_at: Utc::now(),
        };
        self.mentions.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self) -> Result<Vec<Mention>> {
        let mut all = self.stored();
        all.reverse();
        Ok(all)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const PADDLE_RESPONSE: &str = r#"[{"keyword":"paddle","author":"bob","text":"I switched from X to paddle and love it","sentiment":"Positive"}]"#;

fn paddle_search() -> MockSearch {
    MockSearch::default().with_results(
        "paddle",
        vec![snippet(
            "u1",
            "t1",
            "I switched from X to paddle and love it",
        )],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn happy_path_stores_normalized_mention() {
    let store = MemoryStore::default();
    let search = paddle_search();
    let llm = MockLlm::default().with_response("paddle", PADDLE_RESPONSE);
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 1);
    assert_eq!(report.saved_count, 1);

    let stored = store.stored();
    assert_eq!(stored.len(), 1);
    let mention = &stored[0];
    assert_eq!(mention.keyword, "paddle");
    assert_eq!(mention.author, "bob");
    assert_eq!(mention.text, "I switched from X to paddle and love it");
    assert_eq!(mention.sentiment, Sentiment::Positive);
    // The model omitted `url`, so the deterministic fallback is used.
    assert_eq!(mention.url, "https://www.reddit.com/search/?q=paddle&sort=new");
}

#[tokio::test]
async fn second_identical_run_saves_nothing() {
    let store = std::sync::Arc::new(MemoryStore::default());

    for expected_saved in [1, 0] {
        let search = paddle_search();
        let llm = MockLlm::default().with_response("paddle", PADDLE_RESPONSE);
        let pipeline =
            IngestPipeline::new(&search, &llm, store.clone(), vec!["paddle".to_string()]);
        let report = pipeline.run().await.unwrap();
        assert_eq!(report.saved_count, expected_saved);
        assert_eq!(report.total_analyzed, 1);
    }

    assert_eq!(store.stored().len(), 1);
}

#[tokio::test]
async fn duplicate_texts_within_one_run_stored_once() {
    let raw = r#"[
        {"author":"a","text":"same comment","sentiment":"Neutral"},
        {"author":"b","text":"same comment","sentiment":"Negative"}
    ]"#;
    let store = MemoryStore::default();
    let search = paddle_search();
    let llm = MockLlm::default().with_response("paddle", raw);
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 2);
    assert_eq!(report.saved_count, 1);

    let texts: Vec<_> = store.stored().iter().map(|m| m.text.clone()).collect();
    assert_eq!(texts, vec!["same comment".to_string()]);
}

#[tokio::test]
async fn one_keyword_failure_does_not_abort_others() {
    let search = paddle_search().with_failure("ruul");
    let store = MemoryStore::default();
    let llm = MockLlm::default().with_response("paddle", PADDLE_RESPONSE);
    let pipeline = IngestPipeline::new(
        &search,
        &llm,
        &store,
        vec!["ruul".to_string(), "paddle".to_string()],
    );

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.saved_count, 1);
    assert_eq!(report.total_analyzed, 1);
    assert!(report.diagnostics.iter().any(|d| d.contains("ruul")));
    assert_eq!(store.stored()[0].keyword, "paddle");
}

#[tokio::test]
async fn empty_search_results_skip_the_llm() {
    let store = MemoryStore::default();
    let search = MockSearch::default();
    let llm = MockLlm::default();
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 0);
    assert_eq!(report.saved_count, 0);
    assert_eq!(llm.call_count(), 0);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.contains("Skipping")));
}

#[tokio::test]
async fn fenced_response_parses_like_plain_response() {
    let fenced = format!("```json\n{PADDLE_RESPONSE}\n```");
    let store = MemoryStore::default();
    let search = paddle_search();
    let llm = MockLlm::default().with_response("paddle", &fenced);
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 1);
    assert_eq!(report.saved_count, 1);
}

#[tokio::test]
async fn invalid_json_yields_zero_candidates_and_a_diagnostic() {
    let store = MemoryStore::default();
    let search = paddle_search();
    let llm = MockLlm::default().with_response("paddle", "Sorry, I can't help with that.");
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 0);
    assert_eq!(report.saved_count, 0);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.contains("Failed to parse") && d.contains("Sorry, I can't help")));
}

#[tokio::test]
async fn llm_failure_is_contained_per_keyword() {
    // No canned response for "payouts" — the mock errors like a dead API.
    let search = MockSearch::default()
        .with_results("payouts", vec![snippet("u", "t", "text")])
        .with_results(
            "paddle",
            vec![snippet("u1", "t1", "I switched from X to paddle and love it")],
        );
    let store = MemoryStore::default();
    let llm = MockLlm::default().with_response("paddle", PADDLE_RESPONSE);
    let pipeline = IngestPipeline::new(
        &search,
        &llm,
        &store,
        vec!["payouts".to_string(), "paddle".to_string()],
    );

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.saved_count, 1);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.contains("LLM extraction failed for 'payouts'")));
}

#[tokio::test]
async fn storage_failure_is_fatal_to_the_run() {
    let store = MemoryStore::failing();
    let search = paddle_search();
    let llm = MockLlm::default().with_response("paddle", PADDLE_RESPONSE);
    let pipeline = IngestPipeline::new(&search, &llm, &store, vec!["paddle".to_string()]);

    let result = pipeline.run().await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("connection reset"));
}

#[tokio::test]
async fn stored_texts_are_unique_across_keywords() {
    // Both keywords extract the same comment text; only one row survives.
    let raw_a = r#"[{"author":"a","text":"shared text","sentiment":"Neutral"}]"#;
    let raw_b = r#"[{"author":"b","text":"shared text","sentiment":"Positive"}]"#;
    let search = MockSearch::default()
        .with_results("ruul", vec![snippet("u1", "t1", "shared text")])
        .with_results("tipalti", vec![snippet("u2", "t2", "shared text")]);
    let store = MemoryStore::default();
    let llm = MockLlm::default()
        .with_response("ruul", raw_a)
        .with_response("tipalti", raw_b);
    let pipeline = IngestPipeline::new(
        &search,
        &llm,
        &store,
        vec!["ruul".to_string(), "tipalti".to_string()],
    );

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.total_analyzed, 2);
    assert_eq!(report.saved_count, 1);

    let stored = store.stored();
    for (i, a) in stored.iter().enumerate() {
        for b in stored.iter().skip(i + 1) {
            assert_ne!(a.text, b.text);
        }
    }
}
