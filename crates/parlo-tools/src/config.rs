//! Public configuration for the tools client.

use std::time::Duration;

/// Configuration for the remote tool backend client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use parlo_tools::ToolsConfig;
/// use std::time::Duration;
///
/// let config = ToolsConfig::new()
///     .with_base_url("http://tools.internal:5000")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Base URL of the tool backend.
    pub(crate) base_url: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors.
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff.
    pub(crate) retry_base_delay: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl ToolsConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the tool backend.
    ///
    /// Defaults to `http://localhost:5000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. Image generation and transcription can take
    /// a while on the backend, so this bounds a single attempt, not the
    /// whole retried exchange.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolsConfig::new();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ToolsConfig::new()
            .with_base_url("http://tools.internal:9000")
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(100));

        assert_eq!(config.base_url, "http://tools.internal:9000");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_base_delay, Duration::from_millis(100));
    }
}
