use crate::{
    client::Client,
    config::Config,
    error::ParallelError,
    types::search::{SearchRequest, SearchResponse},
};

/// API resource for the `/search` endpoint
pub struct Search<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Search<'c, C> {
    /// Creates a new Search resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Run a batch of search queries
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, or the
    /// API returns a non-success status.
    pub async fn create(&self, req: &SearchRequest) -> Result<SearchResponse, ParallelError> {
        self.client.post("/search", req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Search API resource
    #[must_use]
    pub const fn search(&self) -> Search<'_, C> {
        Search::new(self)
    }
}
