use std::time::Duration;
use url::Url;

use crate::error::{RegistryError, RegistryResult};

pub const DEFAULT_BASE_URL: &str = "https://dev.lumacloud.co/apilic";
pub const DEFAULT_USER_AGENT: &str = "licitaciones-app/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the registry and the backend client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without trailing slashes, ready for path concatenation
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> RegistryResult<()> {
        let parsed = Url::parse(self.base()).map_err(|e| {
            RegistryError::InvalidConfig(format!("base URL '{}' is invalid: {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegistryError::InvalidConfig(format!(
                "base URL '{}' must use http or https",
                self.base_url
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(RegistryError::InvalidConfig("user agent must not be empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(RegistryError::InvalidConfig("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}
