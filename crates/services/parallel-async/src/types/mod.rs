//! Request and response types for the Parallel API

/// Extract endpoint types
pub mod extract;
/// Search endpoint types
pub mod search;

pub use extract::{ExtractErrorEntry, ExtractRequest, ExtractResponse, ExtractedPage};
pub use search::{ExcerptSettings, QueryGroup, SearchEntry, SearchRequest, SearchResponse, WebResult};
