//! LLM extraction: prompt construction and response parsing.
//!
//! The parser is deliberately forgiving about formatting (code fences) and
//! deliberately strict about structure (must decode as an array of objects).

use mentionwatch_common::CandidateMention;

/// Character budget for the text submitted to the model. Oversized snippet
/// blocks are cut at this prefix; late entries in a large batch may be
/// dropped, which bounds cost and latency.
pub const INPUT_CHAR_BUDGET: usize = 10_000;

/// Low temperature biases toward deterministic structured output.
pub const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Enough for a few dozen mention objects; also caps runaway generations.
pub const EXTRACTION_MAX_TOKENS: u32 = 1024;

/// System instruction defining the exact required output shape.
pub fn system_prompt(keyword: &str) -> String {
    format!(
        r#"You are a data extractor. You will be given raw text scraped from a Reddit search page for the keyword "{keyword}".
Each extracted snippet from the search engine has a "URL", "Title", and "Content".
Your job is to identify valid comments or posts that mention the given keyword.
Respond ONLY with a raw JSON array of objects. Do not wrap it in markdown block quotes.
Each object must strictly have this format:
{{
  "keyword": "{keyword}",
  "author": "String, the reddit username of the person who posted it",
  "text": "String, the actual comment or post text",
  "sentiment": "String, exactly one of: 'Positive', 'Negative', 'Neutral'",
  "url": "String, the exact URL provided for this specific snippet"
}}"#
    )
}

/// Decode a raw model response into candidate records.
///
/// Strips code fences first, then requires a JSON array of objects. Returns
/// the decode error for the caller to record; semantic validation of field
/// contents happens later in normalization.
pub fn parse_candidates(raw: &str) -> Result<Vec<CandidateMention>, serde_json::Error> {
    let cleaned = llm_client::util::strip_code_fences(raw);
    serde_json::from_str(&cleaned)
}
