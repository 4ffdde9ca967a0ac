//! Snippet assembly: turn search hits into one delimited text block that the
//! extraction stage can attribute back to source URLs.

use crate::traits::Snippet;

/// Marker line separating snippets in the assembled block.
const SNIPPET_DELIMITER: &str = "\n---\n";

/// Build the site-restricted search query for a keyword. Restricting to
/// reddit.com keeps results on the monitored discussion platform and the
/// "comments" qualifier biases toward thread pages over listings.
pub fn search_query(keyword: &str) -> String {
    format!("site:reddit.com {keyword} comments")
}

/// Concatenate snippets into one block, each prefixed with its URL and title
/// so the extractor can recover provenance per entry.
pub fn assemble_block(snippets: &[Snippet]) -> String {
    snippets
        .iter()
        .map(|s| format!("URL: {}\nTitle: {}\nContent: {}\n", s.url, s.title, s.text))
        .collect::<Vec<_>>()
        .join(SNIPPET_DELIMITER)
}
