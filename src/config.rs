//! Client Configuration
//!
//! Values baked in at build time through environment variables, with
//! defaults matching the dev proxy setup.

use std::sync::OnceLock;

use tracing::Level;

/// Used when `TASKBOARD_API_URL` is unset; the dev server proxies it
pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API, no trailing slash
    pub api_base_url: String,
    /// Project list refetch cadence
    pub poll_interval_ms: u32,
    /// Focus refetches are skipped while data is younger than this
    pub stale_time_ms: u32,
    /// Extra attempts for a failed list fetch
    pub retry_count: u32,
    pub refetch_on_focus: bool,
    pub log_capacity: usize,
    pub log_level: Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: 5_000,
            stale_time_ms: 2_000,
            retry_count: 3,
            refetch_on_focus: true,
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
            log_level: Level::DEBUG,
        }
    }
}

impl ClientConfig {
    /// Build from compile-time environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: normalize_base_url(option_env!("TASKBOARD_API_URL")),
            poll_interval_ms: parse_or(option_env!("TASKBOARD_POLL_INTERVAL_MS"), defaults.poll_interval_ms),
            stale_time_ms: parse_or(option_env!("TASKBOARD_STALE_TIME_MS"), defaults.stale_time_ms),
            retry_count: parse_or(option_env!("TASKBOARD_RETRY_COUNT"), defaults.retry_count),
            refetch_on_focus: parse_or(option_env!("TASKBOARD_REFETCH_ON_FOCUS"), defaults.refetch_on_focus),
            log_capacity: parse_or(option_env!("TASKBOARD_LOG_CAPACITY"), defaults.log_capacity),
            log_level: parse_or(option_env!("TASKBOARD_LOG_LEVEL"), defaults.log_level),
        }
    }
}

/// Strip trailing slashes and whitespace; empty means the proxy default
pub fn normalize_base_url(raw: Option<&str>) -> String {
    let trimmed = raw
        .unwrap_or_default()
        .trim()
        .trim_end_matches('/')
        .trim_end();
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Process-wide configuration
pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(None), "/api");
        assert_eq!(normalize_base_url(Some("   ")), "/api");
        assert_eq!(
            normalize_base_url(Some("https://api.example.com/v1// ")),
            "https://api.example.com/v1"
        );
        assert_eq!(normalize_base_url(Some("http://localhost:4000")), "http://localhost:4000");
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(Some("750"), 5_000u32), 750);
        assert_eq!(parse_or(Some("soon"), 5_000u32), 5_000);
        assert_eq!(parse_or(None, true), true);
        assert_eq!(parse_or(Some("warn"), Level::DEBUG), Level::WARN);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval_ms, 5_000);
        assert_eq!(config.stale_time_ms, 2_000);
        assert_eq!(config.retry_count, 3);
        assert!(config.refetch_on_focus);
    }
}
