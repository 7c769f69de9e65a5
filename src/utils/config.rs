// src/utils/config.rs
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://etfdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;
// etfdb.com rejects the default reqwest agent; present as a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const SCREENER_PATH: &str = "/api/screener/";

/// Connection settings shared by the profile client and the listing scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtfdbConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for EtfdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EtfdbConfig {
    /// Defaults overridden by `ETFDB_BASE_URL`, `ETFDB_USER_AGENT` and `ETFDB_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("ETFDB_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&base_url);
        }
        if let Some(agent) = lookup("ETFDB_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup("ETFDB_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => tracing::warn!(
                    "Ignoring ETFDB_TIMEOUT_SECS={:?}, expected whole seconds",
                    raw
                ),
            }
        }

        config
    }

    /// Replaces the base URL; a trailing slash is dropped so paths can be appended.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint of the paginated screener API.
    pub fn screener_url(&self) -> String {
        format!("{}{}", self.base_url, SCREENER_PATH)
    }
}
