use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::ParallelError};

/// Parallel API client
///
/// The client is generic over a [`Config`] implementation that provides
/// authentication and endpoint configuration. It performs no retries unless a
/// backoff is installed with [`Client::with_backoff`].
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: Option<ExponentialBuilder>,
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_config(config: C) -> Result<Self, ParallelError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            config,
            backoff: None,
        })
    }

    /// Enables retries with the given backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = Some(backoff);
        self
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, ParallelError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let url = self.config.url(path);
        tracing::debug!(%url, "POST");

        let mk = || -> Result<reqwest::Request, ParallelError> {
            Ok(self
                .http
                .post(&url)
                .headers(self.config.headers()?)
                .json(body)
                .build()?)
        };

        let bytes = match self.backoff {
            Some(backoff) => {
                (|| self.send_once(&mk))
                    .retry(backoff)
                    .when(ParallelError::is_retryable)
                    .notify(|err, dur| {
                        tracing::warn!(error = %err, retry_in = ?dur, "retrying Parallel request");
                    })
                    .await?
            }
            None => self.send_once(&mk).await?,
        };

        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    async fn send_once<M>(&self, mk: &M) -> Result<bytes::Bytes, ParallelError>
    where
        M: Fn() -> Result<reqwest::Request, ParallelError>,
    {
        let request = mk()?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "response");

        if status.is_success() {
            return Ok(bytes);
        }

        Err(crate::error::deserialize_api_error(status, &bytes))
    }
}
