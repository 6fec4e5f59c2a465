//! Client configuration.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Default base URL of the National Weather Service API.
pub const DEFAULT_API_BASE: &str = "https://api.weather.gov";

/// Overrides the upstream base URL (used by tests and local fakes).
pub const API_BASE_ENV: &str = "NWS_ALERTS_API_BASE";

/// Optional whole-request timeout in seconds. Unset means no timeout.
pub const HTTP_TIMEOUT_ENV: &str = "NWS_ALERTS_HTTP_TIMEOUT_SECS";

/// Settings shared by every alert source built from one HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
    timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read the configuration from the process environment.
    ///
    /// An unparsable timeout is ignored with a warning rather than failing
    /// start-up.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config = config.with_api_base(base);
            }
        }
        if let Ok(raw) = env::var(HTTP_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => warn!(value = %raw, "ignoring invalid {}", HTTP_TIMEOUT_ENV),
            }
        }
        config
    }

    /// Use `base` instead of the public API. Trailing slashes are dropped.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.api_base = base.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
