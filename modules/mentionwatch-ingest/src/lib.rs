//! Brand-mention ingestion pipeline.
//!
//! For each monitored keyword: search → assemble snippets → LLM extraction →
//! parse → normalize → dedup gate → persist. One keyword's failure never
//! aborts the others; the run's diagnostic trace records what went wrong.

pub mod extractor;
pub mod normalize;
pub mod pipeline;
pub mod snippets;
pub mod traits;

pub use pipeline::IngestPipeline;
pub use traits::{CompletionProvider, MentionStore, SearchProvider, Snippet};
