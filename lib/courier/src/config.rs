//! Client configuration types.

use std::time::Duration;

use crate::DEFAULT_TIMEOUT;

/// Default `User-Agent` sent by [`HyperClient`](crate::HyperClient).
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Timeout used for requests that carry a zero timeout.
    pub default_timeout: Duration,
    /// `User-Agent` header added when a request does not set one.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            default_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The timeout to apply to a request declaring `requested`.
    #[must_use]
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        if requested.is_zero() {
            self.default_timeout
        } else {
            requested
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    connect_timeout: Option<Duration>,
    default_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the timeout used when a request does not declare one.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            default_timeout: self.default_timeout.unwrap_or(defaults.default_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}
