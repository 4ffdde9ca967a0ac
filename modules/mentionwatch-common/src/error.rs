use thiserror::Error;

/// Classified failures at the pipeline's external seams. Client crates keep
/// their own error types; these wrap them with the stage that failed.
#[derive(Error, Debug)]
pub enum MentionWatchError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}
