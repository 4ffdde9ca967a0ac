/// Truncate a string to at most `max_chars` characters.
///
/// Character-based rather than byte-based so multi-byte content can never be
/// split mid-codepoint.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Remove markdown code-fence markers anywhere in a model response.
///
/// Models wrap JSON in ```` ```json ```` fences despite instructions not to,
/// and sometimes emit prose before the opening fence, so every occurrence is
/// removed rather than only leading/trailing ones.
pub fn strip_code_fences(response: &str) -> String {
    response
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}
