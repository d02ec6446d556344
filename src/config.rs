// src/config.rs
use std::{env, fmt, time::Duration};
use thiserror::Error;

#[derive(Clone)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    track_api: TrackApiConfig,
    admin_username: String,
    admin_password: String,
    allowed_origins: Vec<String>,
    rate_limit: Option<RateLimit>,
}

/// Credentials and endpoint for the customer attribute (Track) API.
#[derive(Clone)]
pub struct TrackApiConfig {
    pub base_url: String,
    pub site_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Token bucket applied per client IP to the customer-facing endpoints,
/// which are reachable from links in every marketing email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds between token refills.
    pub per_second: u64,
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://email_processing.db?mode=rwc".into()
}

fn default_port() -> String {
    "3000".into()
}

fn default_track_api_base_url() -> String {
    "https://track.customer.io/api/v1".into()
}

const fn default_track_api_timeout() -> u64 {
    10
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|value| *value > T::default())
        .ok_or_else(|| ConfigError::Invalid(format!("{name} must be a positive integer")))
}

impl AppConfig {
    /// Build configuration from environment variables. Credentials are
    /// required; everything else falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(default_port);
            format!("0.0.0.0:{port}")
        });

        let site_id = required(&lookup, "CUSTOMERIO_SITE_ID")?;
        let api_key = required(&lookup, "CUSTOMERIO_API_KEY")?;
        let admin_username = required(&lookup, "ADMIN_USERNAME")?;
        let admin_password = required(&lookup, "ADMIN_PASSWORD")?;

        let base_url = lookup("TRACK_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(default_track_api_base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "TRACK_API_BASE_URL must be an http(s) URL".into(),
            ));
        }

        let timeout_secs = parse_positive(
            &lookup,
            "TRACK_API_TIMEOUT_SECS",
            default_track_api_timeout(),
        )?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_enabled = lookup("RATE_LIMIT_ENABLED")
            .is_none_or(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off"));
        let rate_limit = if rate_limit_enabled {
            let defaults = RateLimit::default();
            Some(RateLimit {
                per_second: parse_positive(&lookup, "RATE_LIMIT_PER_SECOND", defaults.per_second)?,
                burst: parse_positive(&lookup, "RATE_LIMIT_BURST", defaults.burst)?,
            })
        } else {
            None
        };

        Ok(Self {
            database_url,
            listen_addr,
            track_api: TrackApiConfig {
                base_url,
                site_id,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            admin_username,
            admin_password,
            allowed_origins,
            rate_limit,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub const fn track_api(&self) -> &TrackApiConfig {
        &self.track_api
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Explicit CORS origins. Empty means any origin.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// `None` when `RATE_LIMIT_ENABLED` turns limiting off.
    pub const fn rate_limit(&self) -> Option<RateLimit> {
        self.rate_limit
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("track_api", &self.track_api)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl fmt::Debug for TrackApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackApiConfig")
            .field("base_url", &self.base_url)
            .field("site_id", &self.site_id)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
