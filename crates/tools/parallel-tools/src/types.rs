//! Input/output types for the Parallel tools.

use std::fmt::Write;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolbox_core::TextFormat;

/// Default number of hits per query.
pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Default excerpt budget per hit, in characters.
pub const DEFAULT_MAX_CHARS_PER_RESULT: u32 = 10_000;

const fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

const fn default_max_chars_per_result() -> u32 {
    DEFAULT_MAX_CHARS_PER_RESULT
}

const fn default_true() -> bool {
    true
}

// ============================================================================
// parallel_search types
// ============================================================================

/// Input for the `parallel_search` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Keyword search queries, run together as one batch (at least one)
    pub queries: Vec<String>,
    /// Natural-language context to guide result relevance
    #[serde(default)]
    pub objective: Option<String>,
    /// Maximum results per query (default: 10)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Maximum excerpt characters per result (default: 10000)
    #[serde(default = "default_max_chars_per_result")]
    pub max_chars_per_result: u32,
}

impl SearchInput {
    /// Input for `queries` with every option at its default.
    pub fn new(queries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
            objective: None,
            max_results: DEFAULT_MAX_RESULTS,
            max_chars_per_result: DEFAULT_MAX_CHARS_PER_RESULT,
        }
    }
}

/// Output from the `parallel_search` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchOutput {
    /// Identifier the API assigned to the search
    pub search_id: Option<String>,
    /// One group per input query, in input order
    pub groups: Vec<SearchGroup>,
}

/// Results for one input query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchGroup {
    /// The input query
    pub query: String,
    /// Number of hits in `results`
    pub total_results: usize,
    /// Hits, at most `max_results`
    pub results: Vec<SearchHit>,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    /// Page title
    pub title: Option<String>,
    /// Page URL
    pub url: Option<String>,
    /// Publication date, when known
    pub publish_date: Option<String>,
    /// Site or publisher, when the API reports one
    pub source: Option<String>,
    /// Relevant passages, at most `max_chars_per_result` characters combined
    pub excerpts: Vec<String>,
}

impl TextFormat for SearchOutput {
    fn fmt_text(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.search_id {
            let _ = writeln!(out, "Search: {id}");
        }
        for group in &self.groups {
            let _ = write!(
                out,
                "\n--- {} ({} results) ---\n",
                group.query, group.total_results
            );
            if group.results.is_empty() {
                out.push_str("No results\n");
            }
            for (i, hit) in group.results.iter().enumerate() {
                let _ = write!(
                    out,
                    "\n{}. {}\n   {}\n",
                    i + 1,
                    hit.title.as_deref().unwrap_or("(untitled)"),
                    hit.url.as_deref().unwrap_or("(no url)"),
                );
                if let Some(date) = &hit.publish_date {
                    let _ = writeln!(out, "   Date: {date}");
                }
                if let Some(source) = &hit.source {
                    let _ = writeln!(out, "   Source: {source}");
                }
                for excerpt in &hit.excerpts {
                    let _ = writeln!(out, "   {excerpt}");
                }
            }
        }
        out
    }
}

// ============================================================================
// parallel_extract types
// ============================================================================

/// Input for the `parallel_extract` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractInput {
    /// Public URLs to extract content from (at least one)
    pub urls: Vec<String>,
    /// What content to extract; guides excerpt selection
    #[serde(default)]
    pub objective: Option<String>,
    /// Return focused passages aligned with the objective (default: true)
    #[serde(default = "default_true")]
    pub excerpts: bool,
    /// Return the complete page content as markdown (default: false)
    #[serde(default)]
    pub full_content: bool,
}

impl ExtractInput {
    /// Input for `urls` returning excerpts only.
    pub fn new(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            objective: None,
            excerpts: true,
            full_content: false,
        }
    }
}

/// Output from the `parallel_extract` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractOutput {
    /// Identifier the API assigned to the extraction
    pub extract_id: Option<String>,
    /// One entry per input URL, in input order
    pub results: Vec<ExtractEntry>,
    /// Number of entries carrying an error
    pub failed: usize,
}

/// Extraction outcome for one input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractEntry {
    /// The input URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Publication date, when known
    pub publish_date: Option<String>,
    /// Passages aligned with the objective (only when excerpts were requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpts: Option<Vec<String>>,
    /// Full page content (only when full content was requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    /// Why this URL could not be extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtractFailure>,
}

/// Per-URL extraction failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractFailure {
    /// Failure category: `invalid_url`, `missing`, or the API's error type
    pub kind: String,
    /// Detail message
    pub message: String,
    /// Upstream HTTP status, when one was reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl TextFormat for ExtractOutput {
    fn fmt_text(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.extract_id {
            let _ = writeln!(out, "Extract: {id}");
        }
        let _ = writeln!(
            out,
            "URLs: {} | Failed: {}",
            self.results.len(),
            self.failed
        );
        for entry in &self.results {
            let _ = write!(out, "\n--- {} ---\n", entry.url);
            if let Some(err) = &entry.error {
                let _ = write!(out, "ERROR [{}]: {}", err.kind, err.message);
                if let Some(code) = err.status_code {
                    let _ = write!(out, " (HTTP {code})");
                }
                out.push('\n');
                continue;
            }
            if let Some(title) = &entry.title {
                let _ = writeln!(out, "Title: {title}");
            }
            if let Some(date) = &entry.publish_date {
                let _ = writeln!(out, "Date: {date}");
            }
            if let Some(excerpts) = &entry.excerpts {
                for excerpt in excerpts {
                    let _ = writeln!(out, "- {excerpt}");
                }
            }
            if let Some(content) = &entry.full_content {
                out.push_str("\n--- Content ---\n");
                out.push_str(content);
                out.push('\n');
            }
        }
        out
    }
}

// ============================================================================
// smoke_ping types
// ============================================================================

/// Input for the `smoke_ping` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PingInput {
    /// Message to echo back (default: "pong")
    #[serde(default)]
    pub message: Option<String>,
}

/// Output from the `smoke_ping` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PingOutput {
    pub ok: bool,
    pub message: String,
}

impl TextFormat for PingOutput {
    fn fmt_text(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_input_defaults() {
        let input: SearchInput = serde_json::from_value(json!({"queries": ["rust"]})).unwrap();
        assert_eq!(input.max_results, 10);
        assert_eq!(input.max_chars_per_result, 10_000);
        assert!(input.objective.is_none());
    }

    #[test]
    fn search_input_rejects_negative_bounds() {
        let res = serde_json::from_value::<SearchInput>(json!({
            "queries": ["rust"],
            "max_results": -1
        }));
        assert!(res.is_err());
    }

    #[test]
    fn extract_input_defaults() {
        let input: ExtractInput =
            serde_json::from_value(json!({"urls": ["https://example.com"]})).unwrap();
        assert!(input.excerpts);
        assert!(!input.full_content);
    }

    #[test]
    fn extract_entry_omits_absent_fields() {
        let entry = ExtractEntry {
            url: "https://example.com".into(),
            title: Some("Example".into()),
            publish_date: None,
            excerpts: None,
            full_content: None,
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"url": "https://example.com", "title": "Example", "publish_date": null})
        );
    }

    #[test]
    fn extract_text_shows_failures() {
        let out = ExtractOutput {
            extract_id: None,
            results: vec![ExtractEntry {
                url: "https://bad.example".into(),
                title: None,
                publish_date: None,
                excerpts: None,
                full_content: None,
                error: Some(ExtractFailure {
                    kind: "fetch_error".into(),
                    message: "timed out".into(),
                    status_code: Some(504),
                }),
            }],
            failed: 1,
        };
        let text = out.fmt_text();
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("ERROR [fetch_error]: timed out (HTTP 504)"));
    }

    #[test]
    fn search_text_marks_empty_groups() {
        let out = SearchOutput {
            search_id: Some("s_1".into()),
            groups: vec![SearchGroup {
                query: "nothing".into(),
                total_results: 0,
                results: vec![],
            }],
        };
        let text = out.fmt_text();
        assert!(text.contains("--- nothing (0 results) ---"));
        assert!(text.contains("No results"));
    }
}
