use crate::{
    client::Client,
    config::Config,
    error::ParallelError,
    types::extract::{ExtractRequest, ExtractResponse},
};

/// API resource for the `/extract` endpoint
pub struct Extract<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Extract<'c, C> {
    /// Creates a new Extract resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Extract excerpts and/or full content for a list of URLs
    ///
    /// Per-URL failures are reported in [`ExtractResponse::errors`]; only
    /// call-level failures surface as `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, or the
    /// API returns a non-success status.
    pub async fn create(&self, req: &ExtractRequest) -> Result<ExtractResponse, ParallelError> {
        self.client.post("/extract", req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Extract API resource
    #[must_use]
    pub const fn extract(&self) -> Extract<'_, C> {
        Extract::new(self)
    }
}
