use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::ParallelError;

/// Default Parallel API base URL
pub const PARALLEL_DEFAULT_BASE: &str = "https://api.parallel.ai/v1beta";
/// Beta feature flag required by the search and extract endpoints
pub const PARALLEL_DEFAULT_BETA: &str = "search-extract-2025-10-10";
/// Header name for API key authentication
pub const HDR_X_API_KEY: &str = "x-api-key";
/// Header name for the beta feature flag
pub const HDR_PARALLEL_BETA: &str = "parallel-beta";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PARALLEL_API_KEY";
/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "PARALLEL_BASE_URL";
/// Environment variable overriding the beta header value
pub const ENV_BETA: &str = "PARALLEL_BETA";

/// Configuration for the Parallel client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    api_base: String,
    api_key: Option<SecretString>,
    beta: String,
}

fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            api_base: env_trimmed(ENV_BASE_URL).unwrap_or_else(|| PARALLEL_DEFAULT_BASE.into()),
            api_key: env_trimmed(ENV_API_KEY).map(SecretString::from),
            beta: env_trimmed(ENV_BETA).unwrap_or_else(|| PARALLEL_DEFAULT_BETA.into()),
        }
    }
}

impl ParallelConfig {
    /// Creates a new configuration from the environment
    ///
    /// Reads:
    /// - `PARALLEL_API_KEY` for API key authentication
    /// - `PARALLEL_BASE_URL` for a custom API base URL (defaults to `https://api.parallel.ai/v1beta`)
    /// - `PARALLEL_BETA` for the `parallel-beta` header value
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Clears the API key
    #[must_use]
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Sets the `parallel-beta` header value
    #[must_use]
    pub fn with_beta(mut self, beta: impl Into<String>) -> Self {
        self.beta = beta.into();
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured beta header value
    #[must_use]
    pub fn beta(&self) -> &str {
        &self.beta
    }

    fn trimmed_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|s| s.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }
}

/// Configuration provider for the Parallel client
///
/// Implement this trait to supply credentials and endpoints from somewhere
/// other than the process environment.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, ParallelError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), ParallelError>;
}

impl Config for ParallelConfig {
    fn headers(&self) -> Result<HeaderMap, ParallelError> {
        let mut h = HeaderMap::new();

        if let Some(key) = self.trimmed_key() {
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| ParallelError::Config("Invalid x-api-key value".into()))?;
            value.set_sensitive(true);
            h.insert(HDR_X_API_KEY, value);
        }

        h.insert(
            HDR_PARALLEL_BETA,
            HeaderValue::from_str(&self.beta)
                .map_err(|_| ParallelError::Config("Invalid parallel-beta value".into()))?,
        );

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn validate_auth(&self) -> Result<(), ParallelError> {
        if self.trimmed_key().is_some() {
            Ok(())
        } else {
            Err(ParallelError::Config(format!(
                "Missing Parallel credentials: set {ENV_API_KEY} environment variable"
            )))
        }
    }
}
