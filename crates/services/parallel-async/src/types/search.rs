//! Types for the Parallel `/search` endpoint

use serde::{Deserialize, Deserializer, Serialize};

/// Request body for `POST /search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Natural-language description of what the search is for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,

    /// Keyword queries executed as one batch
    pub search_queries: Vec<String>,

    /// Maximum number of results to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Excerpt sizing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpts: Option<ExcerptSettings>,
}

/// Excerpt settings for search results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcerptSettings {
    /// Upper bound on excerpt characters per result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars_per_result: Option<u32>,
}

impl SearchRequest {
    /// Create a new search request for the given queries
    #[must_use]
    pub const fn new(search_queries: Vec<String>) -> Self {
        Self {
            objective: None,
            search_queries,
            max_results: None,
            excerpts: None,
        }
    }

    /// Set the search objective
    #[must_use]
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    /// Set the maximum number of results
    #[must_use]
    pub const fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }

    /// Set the maximum excerpt characters per result
    #[must_use]
    pub const fn with_max_chars_per_result(mut self, n: u32) -> Self {
        self.excerpts = Some(ExcerptSettings {
            max_chars_per_result: Some(n),
        });
        self
    }
}

/// Response from `POST /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// Identifier assigned to the search by the API
    #[serde(default)]
    pub search_id: Option<String>,

    /// Results, either flat or grouped by query
    #[serde(default)]
    pub results: Vec<SearchEntry>,
}

/// One element of the `results` array.
///
/// The API returns a flat list of pages for a batch; some deployments group
/// pages under the query that produced them. An object with a `query` key is
/// a group, anything else is a page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SearchEntry {
    /// Pages grouped under one query
    Group(QueryGroup),
    /// A single page
    Page(WebResult),
}

// A `query` key commits to the group branch; its errors are never retried as a page.
impl<'de> Deserialize<'de> for SearchEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("query").is_some() {
            QueryGroup::deserialize(value)
                .map(Self::Group)
                .map_err(serde::de::Error::custom)
        } else {
            WebResult::deserialize(value)
                .map(Self::Page)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Pages returned for one query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryGroup {
    /// The query this group answers
    pub query: String,
    /// Pages for the query
    #[serde(default)]
    pub results: Vec<WebResult>,
}

/// A single web page in search results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WebResult {
    /// URL of the page
    #[serde(default)]
    pub url: Option<String>,
    /// Title of the page
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date, when known
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Relevant passages
    #[serde(default)]
    pub excerpts: Option<Vec<String>>,
    /// Single-passage form used by older responses
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Page content used when no excerpt is present
    #[serde(default)]
    pub content: Option<String>,
    /// Site or publisher the page came from, when the API reports one
    #[serde(default)]
    pub source: Option<String>,
}

impl WebResult {
    /// Passages for this page, preferring `excerpts`, then `excerpt`, then `content`
    #[must_use]
    pub fn passages(&self) -> Vec<String> {
        if let Some(excerpts) = &self.excerpts
            && !excerpts.is_empty()
        {
            return excerpts.clone();
        }
        self.excerpt
            .as_ref()
            .or(self.content.as_ref())
            .filter(|s| !s.is_empty())
            .map(|s| vec![s.clone()])
            .unwrap_or_default()
    }
}
