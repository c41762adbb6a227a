use std::time::Duration;

/// Base URL used when none is configured, matching the backend's default
/// listen address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Builder for [`HttpEndpointConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpEndpointConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpEndpointConfigBuilder {
    /// Creates a builder with the given base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: Some(base_url.into()),
            timeout: None,
        }
    }

    /// Sets a per-request timeout. Requests never time out by default.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpEndpointConfig {
        let base_url = self
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        HttpEndpointConfig {
            base_url,
            timeout: self.timeout,
        }
    }
}

/// Configuration for [`crate::HttpEndpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpEndpointConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Option<Duration>,
}

impl HttpEndpointConfig {
    /// Returns the base URL, without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
