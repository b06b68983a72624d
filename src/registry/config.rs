//! Registry configuration

use std::time::Duration;

/// Configuration for the stream registry
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Per-request timeout for networked streams (None = no timeout)
    pub request_timeout: Option<Duration>,

    /// Value for the `User-Agent` header (None = no custom header)
    pub user_agent: Option<String>,

    /// Ignore proxy settings from the environment
    pub no_proxy: bool,
}

impl RegistryConfig {
    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header sent by networked streams
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Bypass any proxy configured in the environment
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the HTTP client described by this configuration
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if self.no_proxy {
            builder = builder.no_proxy();
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();

        assert!(config.request_timeout.is_none());
        assert!(config.user_agent.is_none());
        assert!(!config.no_proxy);
    }

    #[test]
    fn test_builder_chaining() {
        let config = RegistryConfig::default()
            .request_timeout(Duration::from_secs(5))
            .user_agent("twin-streams/0.1")
            .no_proxy();

        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent.as_deref(), Some("twin-streams/0.1"));
        assert!(config.no_proxy);
        assert!(config.http_client().is_ok());
    }
}
