use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentiment of a mention. Closed enumeration: model output that doesn't
/// match one of the three labels is coerced to `Neutral` at normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Parse a model-emitted sentiment label. Unrecognized or absent values
    /// collapse to `Neutral` so arbitrary strings never reach storage.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("Positive") => Sentiment::Positive,
            Some("Negative") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted brand mention. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: Uuid,
    pub keyword: String,
    pub author: String,
    /// Verbatim comment or post content. This is the dedup key: no two
    /// stored mentions share an identical text value.
    pub text: String,
    pub sentiment: Sentiment,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// The fields of a mention before storage assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMention {
    pub keyword: String,
    pub author: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub url: String,
}

/// Raw candidate record decoded from the model's JSON array. Everything is
/// optional: field presence is resolved by normalization, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateMention {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Per-run aggregate returned by the ingestion pipeline and discarded after
/// the response. Diagnostics are ordered, human-readable trace lines.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub total_analyzed: usize,
    pub saved_count: usize,
    pub diagnostics: Vec<String>,
}

impl RunReport {
    pub fn diag(&mut self, line: impl Into<String>) {
        self.diagnostics.push(line.into());
    }
}
