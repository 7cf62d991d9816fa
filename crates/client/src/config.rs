//! Service credentials and address.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const ENV_API_URL: &str = "AUTOCONTENT_API_URL";
pub const ENV_API_KEY: &str = "AUTOCONTENT_API_KEY";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "AUTOCONTENT_REQUEST_TIMEOUT_MS";
pub const ENV_USER_AGENT: &str = "AUTOCONTENT_USER_AGENT";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid service URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("service is in offline mode; job submission requires a configured service")]
    Offline,
}

/// Credential and base address of the content service.
///
/// Read-only for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: Url,
    api_key: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

// Keeps the key out of logs.
impl core::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ServiceConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Missing(ENV_API_URL));
        }
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_API_KEY));
        }

        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) base address".to_string(),
            });
        }

        Ok(Self {
            base_url: parsed,
            api_key: api_key.trim().to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("autocontent/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL).ok_or(ConfigError::Missing(ENV_API_URL))?;
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let mut config = Self::new(&base_url, api_key)?;

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_REQUEST_TIMEOUT_MS,
                reason: format!("expected milliseconds, got `{raw}`"),
            })?;
            if millis == 0 {
                return Err(ConfigError::Invalid {
                    key: ENV_REQUEST_TIMEOUT_MS,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.request_timeout = Duration::from_millis(millis);
        }

        match lookup(ENV_USER_AGENT) {
            Some(agent) if !agent.trim().is_empty() => Ok(config.with_user_agent(agent.trim())),
            _ => Ok(config),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Absolute URL for the unencoded path `segments` under the base address.
    pub fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Whether a live service is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceMode {
    Online(ServiceConfig),
    /// No service configured. Only the voice catalog is served, from the
    /// built-in default set.
    OfflineFallback,
}

impl ServiceMode {
    /// [`ServiceMode::from_lookup`] over the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Offline when no service address is set. An address without a usable
    /// key is still an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_API_URL) {
            Some(url) if !url.trim().is_empty() => {
                ServiceConfig::from_lookup(lookup).map(ServiceMode::Online)
            }
            _ => Ok(ServiceMode::OfflineFallback),
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, ServiceMode::OfflineFallback)
    }

    /// Ensure a service is configured.
    pub fn require_online(&self) -> Result<&ServiceConfig, ConfigError> {
        match self {
            ServiceMode::Online(config) => Ok(config),
            ServiceMode::OfflineFallback => Err(ConfigError::Offline),
        }
    }
}
