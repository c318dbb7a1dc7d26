//! Catalog client configuration.
//!
//! Points the client at a running catalog API. Override via environment
//! variables or explicit construction for tests.

use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the catalog API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog API.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CATALOG_API_URL` (default: `http://localhost:5000`)
    /// - `CATALOG_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Unset or
    /// blank variables take their defaults; unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw = var("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = match var("CATALOG_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url: parse_url("CATALOG_API_URL", &raw)?,
            timeout_secs,
        })
    }

    /// Replace the base URL, keeping the other settings.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url("base_url", raw)?;
        Ok(self)
    }

    /// Base URL without a trailing slash, for joining paths.
    pub fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl(
            var.to_string(),
            format!("unsupported scheme \"{other}\""),
        )),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
