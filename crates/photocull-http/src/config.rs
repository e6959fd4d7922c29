//! Public configuration for the HTTP persistence adapter.

use std::time::Duration;

/// Default API root of a locally running photocull server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// Configuration for [`HttpPersistence`](crate::HttpPersistence).
///
/// # Example
///
/// ```
/// use photocull_http::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new()
///     .with_base_url("http://triage.local:5000/api/")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API root every route is joined onto
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout; `None` waits indefinitely
    pub(crate) timeout: Option<Duration>,
    /// Retry attempts for transient `GET` failures
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("photocull-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    ///
    /// Defaults to `http://localhost:5000/api/`. A missing trailing slash is
    /// added when the client is built.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a request timeout. Uploads of large files can take a while, so
    /// there is none by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retry attempts for the image listing.
    ///
    /// Defaults to 3 retries. Writes are never retried.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// The configured API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api/");
        assert!(config.user_agent.starts_with("photocull-http/"));
        assert!(config.timeout.is_none());
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_pattern() {
        let config = HttpClientConfig::new()
            .with_base_url("http://example.com/api")
            .with_user_agent("photocull-cli/0.3")
            .with_timeout(Duration::from_secs(10))
            .with_max_retries(0)
            .with_retry_delay(Duration::from_millis(50));

        assert_eq!(config.base_url(), "http://example.com/api");
        assert_eq!(config.user_agent, "photocull-cli/0.3");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_base_delay, Duration::from_millis(50));
    }
}
