//! API resource implementations for the Parallel client

/// Extract API resource
pub mod extract;
/// Search API resource
pub mod search;

pub use extract::Extract;
pub use search::Search;
