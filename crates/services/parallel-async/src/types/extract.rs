//! Types for the Parallel `/extract` endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /extract`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractRequest {
    /// Public URLs to extract content from
    pub urls: Vec<String>,

    /// What content to extract; guides excerpt selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,

    /// Return passages aligned with the objective
    pub excerpts: bool,

    /// Return the whole page as markdown
    pub full_content: bool,
}

impl ExtractRequest {
    /// Create a new extract request returning excerpts only
    #[must_use]
    pub const fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            objective: None,
            excerpts: true,
            full_content: false,
        }
    }

    /// Set the extraction objective
    #[must_use]
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    /// Toggle excerpt output
    #[must_use]
    pub const fn with_excerpts(mut self, excerpts: bool) -> Self {
        self.excerpts = excerpts;
        self
    }

    /// Toggle full-content output
    #[must_use]
    pub const fn with_full_content(mut self, full_content: bool) -> Self {
        self.full_content = full_content;
        self
    }
}

/// Response from `POST /extract`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractResponse {
    /// Identifier assigned to the extraction by the API
    #[serde(default)]
    pub extract_id: Option<String>,

    /// Pages that were extracted
    #[serde(default)]
    pub results: Vec<ExtractedPage>,

    /// URLs that could not be extracted
    #[serde(default)]
    pub errors: Vec<ExtractErrorEntry>,
}

/// Content extracted from one URL
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedPage {
    /// URL of the page
    #[serde(default)]
    pub url: String,
    /// Page title
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date, when known
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Passages aligned with the objective
    #[serde(default)]
    pub excerpts: Option<Vec<String>>,
    /// Full page content as markdown
    #[serde(default)]
    pub full_content: Option<String>,
}

/// Per-URL failure reported by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractErrorEntry {
    /// URL that failed
    #[serde(default)]
    pub url: String,
    /// Failure category (e.g. `fetch_error`)
    #[serde(default)]
    pub error_type: Option<String>,
    /// Upstream HTTP status, when one was received
    #[serde(default)]
    pub http_status_code: Option<u16>,
    /// Detail message
    #[serde(default)]
    pub content: Option<String>,
}
