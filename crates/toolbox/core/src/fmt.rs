//! Text rendering for tool outputs.
//!
//! MCP clients show tool results to a model as text. Output types implement
//! [`TextFormat`] to control that rendering; the JSON form still travels in
//! `structured_content` when the server runs in structured mode.

/// Human-readable rendering of a tool output.
pub trait TextFormat {
    /// Format the value as text.
    fn fmt_text(&self) -> String;
}

/// Truncate `s` to at most `max` characters on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
