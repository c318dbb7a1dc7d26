//! Service configuration.
//!
//! Read from environment variables (a `.env` file is loaded by the binary
//! before this runs). Every lookup goes through a caller-supplied closure so
//! tests can build configurations without touching process state.

use std::path::PathBuf;

use catalog_core::MailRoute;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit (50 MiB), large enough for ten images.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: PathBuf,
    /// Base URL used when building absolute image URLs.
    pub public_base_url: String,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Whether `/metrics` is mounted and request metrics recorded.
    pub metrics_enabled: bool,
    /// Emit JSON-formatted logs instead of human-readable text.
    pub json_logs: bool,
    /// SMTP transport settings. `None` falls back to the in-memory outbox.
    pub smtp: Option<SmtpConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from("uploads"),
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            metrics_enabled: true,
            json_logs: false,
            smtp: None,
        }
    }
}

/// SMTP relay settings.
///
/// Custom `Debug` implementation redacts the password.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port (implicit TLS).
    pub port: u16,
    /// Login user; also used as the sender address.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Recipient of enquiry notifications.
    pub recipient: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl SmtpConfig {
    /// Sender and recipient for enquiry mail.
    pub fn route(&self) -> MailRoute {
        MailRoute {
            from: self.username.clone(),
            to: self.recipient.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Variables:
    /// - `PORT` (default: 5000)
    /// - `CATALOG_UPLOAD_DIR` (default: `uploads`)
    /// - `CATALOG_PUBLIC_URL` (default: `http://localhost:<PORT>`)
    /// - `CATALOG_MAX_BODY_BYTES` (default: 52428800)
    /// - `CATALOG_METRICS_ENABLED` (default: true)
    /// - `CATALOG_LOG_FORMAT` (`text` or `json`, default: text)
    /// - `SMTP_HOST` (default: `smtp.gmail.com`), `SMTP_PORT` (default: 465)
    /// - `EMAIL_USER`, `EMAIL_PASS`, `EMAIL_TO` (all three enable SMTP)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_var(&var, "PORT")?.unwrap_or(DEFAULT_PORT);
        let upload_dir = var("CATALOG_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));
        let public_base_url = var("CATALOG_PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        if !(public_base_url.starts_with("http://") || public_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "CATALOG_PUBLIC_URL".to_string(),
                reason: format!("expected an http(s) URL, got \"{public_base_url}\""),
            });
        }
        let max_body_bytes =
            parse_var(&var, "CATALOG_MAX_BODY_BYTES")?.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let metrics_enabled = parse_bool(&var, "CATALOG_METRICS_ENABLED")?.unwrap_or(true);
        let json_logs = match var("CATALOG_LOG_FORMAT").as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "CATALOG_LOG_FORMAT".to_string(),
                    reason: format!("expected \"text\" or \"json\", got \"{other}\""),
                })
            }
        };

        let smtp = match (var("EMAIL_USER"), var("EMAIL_PASS"), var("EMAIL_TO")) {
            (Some(username), Some(password), Some(recipient)) => Some(SmtpConfig {
                host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                port: parse_var(&var, "SMTP_PORT")?.unwrap_or(465),
                username,
                password,
                recipient,
            }),
            _ => None,
        };

        Ok(Self {
            port,
            upload_dir,
            public_base_url,
            max_body_bytes,
            metrics_enabled,
            json_logs,
            smtp,
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("\"{raw}\": {e}"),
            })
        })
        .transpose()
}

fn parse_bool<F>(var: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("expected a boolean, got \"{raw}\""),
            }),
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
