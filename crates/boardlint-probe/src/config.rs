//! Prober configuration.
//!
//! Points the prober at a running widget backend. Defaults target a local
//! development server. Override via environment variables, CLI flags, or
//! explicit construction in tests.

use std::time::Duration;

use url::Url;

/// Backend assumed when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7779";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "BOARDLINT_BASE_URL";

/// Environment variable overriding the per-widget request timeout.
pub const TIMEOUT_ENV: &str = "BOARDLINT_PROBE_TIMEOUT_SECS";

/// Configuration for probing a widget backend.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Root of the backend. Widget endpoints are resolved beneath it.
    pub base_url: Url,
    /// Timeout for each widget endpoint request.
    pub widget_timeout: Duration,
    /// Timeout for the initial liveness request.
    pub liveness_timeout: Duration,
    /// Timeout for `/widgets.json` and `/apps.json`.
    pub core_timeout: Duration,
}

impl ProbeConfig {
    /// Configuration with default timeouts (30 s per widget, 5 s liveness,
    /// 10 s core documents).
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            widget_timeout: Duration::from_secs(30),
            liveness_timeout: Duration::from_secs(5),
            core_timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BOARDLINT_BASE_URL` (default: `http://localhost:7779`)
    /// - `BOARDLINT_PROBE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(env_url(BASE_URL_ENV, DEFAULT_BASE_URL)?);
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(TIMEOUT_ENV.to_string(), raw.clone()))?;
            config.widget_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Replace the base URL, e.g. from a `--base-url` flag.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// The base URL as shown in messages, without a trailing slash.
    pub fn display_base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Resolve an endpoint path beneath the base URL.
    ///
    /// Leading slashes on `endpoint` are ignored, so `/prices` and `prices`
    /// both resolve under any path prefix the base URL carries.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.display_base(),
            endpoint.trim_start_matches('/')
        ))
    }
}

/// Parse a base URL supplied by a flag or environment variable.
pub fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout for {0}: {1:?} is not a whole number of seconds")]
    InvalidTimeout(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ProbeConfig {
        ProbeConfig::new(base.parse().unwrap())
    }

    #[test]
    fn default_timeouts() {
        let c = config(DEFAULT_BASE_URL);
        assert_eq!(c.widget_timeout, Duration::from_secs(30));
        assert_eq!(c.liveness_timeout, Duration::from_secs(5));
        assert_eq!(c.core_timeout, Duration::from_secs(10));
    }

    #[test]
    fn display_base_has_no_trailing_slash() {
        assert_eq!(config("http://localhost:7779").display_base(), "http://localhost:7779");
        assert_eq!(config("http://localhost:7779/").display_base(), "http://localhost:7779");
    }

    #[test]
    fn endpoint_urls_resolve_under_base() {
        let c = config("http://localhost:7779");
        assert_eq!(
            c.endpoint_url("/prices").unwrap().as_str(),
            "http://localhost:7779/prices"
        );
        let prefixed = config("http://host:8000/api/");
        assert_eq!(
            prefixed.endpoint_url("news/latest").unwrap().as_str(),
            "http://host:8000/api/news/latest"
        );
    }

    #[test]
    fn bad_base_url_names_its_source() {
        let err = parse_base_url("--base-url", "not a url").unwrap_err();
        assert!(err.to_string().starts_with("invalid URL for --base-url: "));
    }
}
