//! Runtime settings for the searcher and its HTTP client.

use std::time::Duration;

use marquee_core::urls;
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Site root the search URL is built on.
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Whether [`crate::Searcher::search_query`] downloads thumbnails.
    pub fetch_thumbnails: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: urls::BASE_URL.to_string(),
            user_agent: concat!("marquee/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fetch_thumbnails: true,
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by `MARQUEE_BASE_URL`, `MARQUEE_USER_AGENT`,
    /// `MARQUEE_TIMEOUT_SECS` and `MARQUEE_FETCH_THUMBNAILS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SearchConfig::from_env`] with a custom variable source.
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup("MARQUEE_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("MARQUEE_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup("MARQUEE_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid MARQUEE_TIMEOUT_SECS"),
            }
        }
        if let Some(raw) = lookup("MARQUEE_FETCH_THUMBNAILS") {
            match parse_flag(&raw) {
                Some(flag) => config.fetch_thumbnails = flag,
                None => warn!(value = %raw, "ignoring invalid MARQUEE_FETCH_THUMBNAILS"),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> SearchConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "https://www.imdb.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.fetch_thumbnails);
        assert!(config.user_agent.starts_with("marquee/"));
    }

    #[test]
    fn no_variables_means_defaults() {
        assert_eq!(config_from(&[]), SearchConfig::default());
    }

    #[test]
    fn variables_override() {
        let config = config_from(&[
            ("MARQUEE_BASE_URL", "http://localhost:8080/"),
            ("MARQUEE_USER_AGENT", "test-agent"),
            ("MARQUEE_TIMEOUT_SECS", "5"),
            ("MARQUEE_FETCH_THUMBNAILS", "off"),
        ]);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.fetch_thumbnails);
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = config_from(&[
            ("MARQUEE_TIMEOUT_SECS", "soon"),
            ("MARQUEE_FETCH_THUMBNAILS", "maybe"),
            ("MARQUEE_BASE_URL", "  "),
        ]);
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = config_from(&[("MARQUEE_TIMEOUT_SECS", "0")]);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
