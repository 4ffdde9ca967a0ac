//! Candidate normalization: fill missing optional fields with policy
//! defaults and stamp each record with its batch keyword.

use mentionwatch_common::{CandidateMention, NewMention, Sentiment};

/// Sentinel author when the model couldn't identify the poster.
pub const UNKNOWN_AUTHOR: &str = "u/Unknown";

/// Sentinel text when the model emitted an object with no content. Kept
/// rather than discarded; downstream consumers treat it as low-value.
pub const EMPTY_CONTENT: &str = "Empty content";

/// Deterministic per-keyword search-results URL used when the model omits a
/// source URL.
pub fn fallback_url(keyword: &str) -> String {
    format!("https://www.reddit.com/search/?q={keyword}&sort=new")
}

/// Total function: every candidate becomes a well-formed mention. The
/// keyword always comes from the batch, never from the model, since the
/// pipeline is the source of truth for attribution.
pub fn normalize(keyword: &str, candidate: CandidateMention) -> NewMention {
    NewMention {
        keyword: keyword.to_string(),
        author: non_empty(candidate.author).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        text: non_empty(candidate.text).unwrap_or_else(|| EMPTY_CONTENT.to_string()),
        sentiment: Sentiment::parse(candidate.sentiment.as_deref()),
        url: non_empty(candidate.url).unwrap_or_else(|| fallback_url(keyword)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
